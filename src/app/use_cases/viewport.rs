//! Use-Case-Funktionen für Viewport-Zustand: Resize, Pan und Zoom.

use glam::DVec2;

use crate::app::gestures::{ActiveGesture, PanGesture};
use crate::app::AppState;

/// Übernimmt den Container-Ursprung sofort und plant die Größenänderung ein.
pub fn schedule_resize(state: &mut AppState, origin: DVec2, size: DVec2, now_ms: f64) {
    state.view.container_origin = origin;
    if state.view.container_size == DVec2::ZERO {
        // Erste Messung ohne Verzögerung.
        apply_size(state, size);
        return;
    }
    state.view.pending_resize.schedule(size, now_ms);
}

/// Wendet eine fällige Größenänderung an.
pub fn flush_resize(state: &mut AppState, now_ms: f64) -> bool {
    match state.view.pending_resize.poll(now_ms) {
        Some(size) => {
            apply_size(state, size);
            true
        }
        None => false,
    }
}

fn apply_size(state: &mut AppState, size: DVec2) {
    state.view.container_size = size.max(DVec2::ZERO);
    state.view.refit();
    log::debug!(
        "Container {:.0}x{:.0}, Grundriss bei ({:.1}, {:.1}) mit {:.1}x{:.1}",
        size.x,
        size.y,
        state.view.image_rect.origin.x,
        state.view.image_rect.origin.y,
        state.view.image_rect.size.x,
        state.view.image_rect.size.y
    );
}

/// Zoom zum Cursor (container-relativ) per Mausrad.
pub fn zoom_at_cursor(state: &mut AppState, local: DVec2, delta_y: f64) {
    let sensitivity = state.options.zoom_sensitivity;
    state.view.viewport.zoom_wheel(local, delta_y, sensitivity);
}

/// Stufenzoom um die Container-Mitte.
pub fn zoom_by(state: &mut AppState, factor: f64) {
    let center = state.view.container_center();
    state.view.viewport.zoom_by(factor, center);
}

/// Scale 1, Offset 0.
pub fn reset_view(state: &mut AppState) {
    state.view.viewport.reset();
}

/// Startet einen Pan, sofern keine andere Geste läuft.
pub fn begin_pan(state: &mut AppState, local: DVec2) {
    if !state.editor.gesture.is_idle() {
        log::debug!("Pan ignoriert: Geste aktiv");
        return;
    }
    let gesture = PanGesture::begin(&mut state.view.viewport, local, &state.editor.pointer_host);
    state.editor.gesture = ActiveGesture::Pan(gesture);
}

/// Setzt einen laufenden Pan fort.
pub fn pan_to(state: &mut AppState, local: DVec2) {
    if let ActiveGesture::Pan(gesture) = &state.editor.gesture {
        gesture.update(&mut state.view.viewport, local);
    }
}

/// Beendet einen laufenden Pan.
pub fn end_pan(state: &mut AppState) {
    if let ActiveGesture::Pan(gesture) = state.editor.gesture.take() {
        gesture.end(&mut state.view.viewport);
    }
}
