//! Handler für Raster und Raster-Griff.

use glam::DVec2;

use crate::app::services::EditorServices;
use crate::app::use_cases;
use crate::app::{AppState, EditorEvent};

/// Schaltet das Raster um.
pub fn toggle(state: &mut AppState) {
    use_cases::grid::toggle(state);
}

/// Verdoppelt die Rasterweite.
pub fn increase_step(state: &mut AppState, services: &mut EditorServices) {
    let before = state.view.grid.offset();
    use_cases::grid::increase_step(state, services.offsets.as_mut());
    notify_offset(state, services, before);
}

/// Halbiert die Rasterweite.
pub fn decrease_step(state: &mut AppState, services: &mut EditorServices) {
    let before = state.view.grid.offset();
    use_cases::grid::decrease_step(state, services.offsets.as_mut());
    notify_offset(state, services, before);
}

/// Setzt den Offset zurück.
pub fn reset_offset(state: &mut AppState, services: &mut EditorServices) {
    let before = state.view.grid.offset();
    use_cases::grid::reset_offset(state, services.offsets.as_mut());
    notify_offset(state, services, before);
}

/// Druck auf den Raster-Griff.
pub fn press_handle(
    state: &mut AppState,
    services: &mut EditorServices,
    position: DVec2,
    now_ms: f64,
) {
    let before = state.view.grid.offset();
    use_cases::grid::press_handle(state, services.offsets.as_mut(), position, now_ms);
    notify_offset(state, services, before);
}

/// Bewegung des Raster-Griffs.
pub fn move_handle(
    state: &mut AppState,
    services: &mut EditorServices,
    position: DVec2,
    movement: DVec2,
    now_ms: f64,
) {
    let before = state.view.grid.offset();
    use_cases::grid::move_handle(state, services.offsets.as_mut(), position, movement, now_ms);
    notify_offset(state, services, before);
}

/// Beendet den Raster-Drag.
pub fn release_handle(state: &mut AppState) {
    use_cases::grid::release_handle(state);
}

/// Capture-Status vom Host.
pub fn set_pointer_captured(state: &mut AppState, captured: bool, now_ms: f64) {
    use_cases::grid::set_pointer_captured(state, captured, now_ms);
}

fn notify_offset(state: &AppState, services: &mut EditorServices, before: DVec2) {
    let offset = state.view.grid.offset();
    if offset == before {
        return;
    }
    if let Some(floor_id) = state.floor_id() {
        services.emit(EditorEvent::GridOffsetChanged { floor_id, offset });
    }
}
