//! Handler für Drag-to-Connect.

use glam::DVec2;

use crate::app::gestures::ConnectOutcome;
use crate::app::services::EditorServices;
use crate::app::use_cases;
use crate::app::{AppState, EditorEvent};

/// Startet die Geste an einem Fulcrum.
pub fn begin(state: &mut AppState, from: u64) {
    use_cases::connect::begin(state, from);
}

/// Führt die Vorschau nach.
pub fn update_preview(state: &mut AppState, pointer: DVec2) {
    use_cases::connect::update_preview(state, pointer);
}

/// Wertet das Loslassen aus.
pub fn finish(state: &mut AppState, services: &mut EditorServices, pointer: DVec2) {
    if let ConnectOutcome::Committed { from, to } = use_cases::connect::finish(state, pointer) {
        services.emit(EditorEvent::ConnectionCommitted { from, to });
    }
}

/// Bricht jede laufende Geste ab.
pub fn cancel(state: &mut AppState) {
    use_cases::connect::cancel_gesture(state);
}
