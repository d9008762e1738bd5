//! Handler für Container-Geometrie, Pan und Zoom.

use glam::DVec2;

use crate::app::use_cases;
use crate::app::AppState;

/// Übernimmt neue Container-Geometrie (Größe verzögert).
pub fn schedule_resize(state: &mut AppState, origin: DVec2, size: DVec2, now_ms: f64) {
    use_cases::viewport::schedule_resize(state, origin, size, now_ms);
}

/// Wendet eine fällige Größenänderung an.
pub fn flush_resize(state: &mut AppState, now_ms: f64) {
    use_cases::viewport::flush_resize(state, now_ms);
}

/// Startet einen Pan.
pub fn begin_pan(state: &mut AppState, local: DVec2) {
    use_cases::viewport::begin_pan(state, local);
}

/// Setzt den Pan fort.
pub fn pan_to(state: &mut AppState, local: DVec2) {
    use_cases::viewport::pan_to(state, local);
}

/// Beendet den Pan.
pub fn end_pan(state: &mut AppState) {
    use_cases::viewport::end_pan(state);
}

/// Zoom zum Cursor.
pub fn zoom_at_cursor(state: &mut AppState, local: DVec2, delta_y: f64) {
    use_cases::viewport::zoom_at_cursor(state, local, delta_y);
}

/// Stufenzoom.
pub fn zoom_by(state: &mut AppState, factor: f64) {
    use_cases::viewport::zoom_by(state, factor);
}

/// Setzt den Viewport zurück.
pub fn reset_view(state: &mut AppState) {
    use_cases::viewport::reset_view(state);
}
