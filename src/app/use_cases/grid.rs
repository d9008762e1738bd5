//! Raster: Umschalten, Weite, Offset-Drag und Persistenz des Offsets.

use glam::DVec2;

use crate::app::gestures::{ActiveGesture, GridPress};
use crate::app::AppState;
use crate::storage::GridOffsetStore;

/// Schaltet das Raster um.
pub fn toggle(state: &mut AppState) -> bool {
    let enabled = state.view.grid.toggle();
    log::info!("Raster {}", if enabled { "aktiviert" } else { "deaktiviert" });
    enabled
}

/// Verdoppelt die Rasterweite.
pub fn increase_step(state: &mut AppState, store: &mut dyn GridOffsetStore) -> f64 {
    let step = state.view.grid.increase_step();
    persist(state, store);
    step
}

/// Halbiert die Rasterweite.
pub fn decrease_step(state: &mut AppState, store: &mut dyn GridOffsetStore) -> f64 {
    let step = state.view.grid.decrease_step();
    persist(state, store);
    step
}

/// Setzt den Offset auf `(0, 0)` und speichert ihn.
pub fn reset_offset(state: &mut AppState, store: &mut dyn GridOffsetStore) {
    state.view.grid.reset_offset();
    persist(state, store);
}

/// Lädt den gespeicherten Offset des Stockwerks; fehlend oder unlesbar → `(0, 0)`.
pub fn restore_offset(state: &mut AppState, store: &mut dyn GridOffsetStore, floor_id: u64) {
    let stored = store.load(floor_id).unwrap_or(DVec2::ZERO);
    let offset = state.view.grid.set_offset(stored);
    log::debug!("Raster-Offset für Stockwerk {}: ({:.4}, {:.4})", floor_id, offset.x, offset.y);
}

/// Druck auf den Raster-Griff an `position` (normalisiert).
pub fn press_handle(
    state: &mut AppState,
    store: &mut dyn GridOffsetStore,
    position: DVec2,
    now_ms: f64,
) -> bool {
    if !state.editor.gesture.is_idle() {
        return false;
    }
    let press = state.editor.grid_handle.press(
        &mut state.view.grid,
        position,
        now_ms,
        state.options.grid_double_click_ms,
        &state.editor.pointer_host,
    );
    match press {
        GridPress::Reset => {
            persist(state, store);
            true
        }
        GridPress::Started(drag) => {
            state.editor.gesture = ActiveGesture::Grid(drag);
            false
        }
    }
}

/// Bewegung während des Raster-Drags. Liefert den neuen Offset bei Änderung.
pub fn move_handle(
    state: &mut AppState,
    store: &mut dyn GridOffsetStore,
    position: DVec2,
    movement: DVec2,
    now_ms: f64,
) -> Option<DVec2> {
    let ActiveGesture::Grid(drag) = &mut state.editor.gesture else {
        return None;
    };
    let changed = if drag.is_captured() {
        drag.move_relative(
            &mut state.view.grid,
            movement,
            state.view.image_rect.size,
            state.view.viewport.scale,
        )
    } else {
        drag.move_absolute(
            &mut state.view.grid,
            position,
            state.options.grid_drag_threshold,
            &state.editor.grid_handle,
            now_ms,
            state.options.capture_retry_cooldown_ms,
            &state.editor.pointer_host,
        )
    };
    if changed.is_some() {
        persist(state, store);
    }
    changed
}

/// Beendet den Raster-Drag.
pub fn release_handle(state: &mut AppState) {
    if let ActiveGesture::Grid(drag) = state.editor.gesture.take() {
        drag.end();
    }
}

/// Host meldet Capture-Status. Nur ein Verlust ist relevant.
pub fn set_pointer_captured(state: &mut AppState, captured: bool, now_ms: f64) {
    if captured {
        return;
    }
    match &mut state.editor.gesture {
        ActiveGesture::Grid(drag) => drag.capture_lost(&mut state.editor.grid_handle, now_ms),
        _ => state.editor.grid_handle.record_capture_loss(now_ms),
    }
}

fn persist(state: &AppState, store: &mut dyn GridOffsetStore) {
    if let Some(floor_id) = state.floor_id() {
        store.save(floor_id, state.view.grid.offset());
    }
}
