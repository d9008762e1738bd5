//! Drag-to-Connect auf dem Canvas.

use glam::DVec2;

use crate::app::gestures::{ActiveGesture, ConnectDrag, ConnectOutcome};
use crate::app::modals::ModalAction;
use crate::app::AppState;

/// Beginnt die Geste am Fulcrum `from`.
pub fn begin(state: &mut AppState, from: u64) -> bool {
    if !state.editor.gesture.is_idle() {
        return false;
    }
    let Some(fulcrum) = state.graph.fulcrum(from) else {
        log::warn!("Drag-to-Connect: Fulcrum {} unbekannt", from);
        return false;
    };
    let from_pos = state.view.display_position(fulcrum.position);
    let drag = ConnectDrag::begin(from, from_pos, &state.editor.pointer_host);
    state.editor.gesture = ActiveGesture::Connect(drag);
    true
}

/// Führt die Vorschau zur Pointer-Position (Seitenkoordinate) nach.
pub fn update_preview(state: &mut AppState, pointer: DVec2) {
    let display = state.view.to_display_from_pointer(pointer);
    if let ActiveGesture::Connect(drag) = &mut state.editor.gesture {
        drag.update(display);
    }
}

/// Wertet das Loslassen aus. Bei Treffer öffnet sich das Verbindungs-Modal.
pub fn finish(state: &mut AppState, pointer: DVec2) -> ConnectOutcome {
    let ActiveGesture::Connect(drag) = state.editor.gesture.take() else {
        return ConnectOutcome::Discarded;
    };
    let release = state.view.to_local(pointer);
    let markers: Vec<(u64, DVec2)> = state
        .graph
        .positions()
        .map(|(id, position)| (id, state.view.screen_position(position)))
        .collect();
    let outcome = drag.finish(release, markers, state.options.connect_hit_radius_px);

    if let ConnectOutcome::Committed { from, to } = outcome {
        state
            .modals
            .apply(ModalAction::OpenConnectionCreate { from, to });
    }
    outcome
}

/// Bricht jede laufende Geste ab; Guards geben Host-Ressourcen frei.
pub fn cancel_gesture(state: &mut AppState) {
    match state.editor.gesture.take() {
        ActiveGesture::None => {}
        ActiveGesture::Pan(gesture) => gesture.end(&mut state.view.viewport),
        ActiveGesture::Connect(_) => log::debug!("Drag-to-Connect abgebrochen"),
        ActiveGesture::Grid(drag) => drag.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fulcrum, FulcrumType};
    use crate::app::modals::ModalMode;

    fn state() -> AppState {
        let mut state = AppState::new();
        state.view.container_size = DVec2::new(800.0, 600.0);
        state.view.plan_size = DVec2::new(800.0, 600.0);
        state.view.refit();
        state.graph = crate::core::WaypointGraph::new(1);
        state
            .graph
            .upsert_fulcrum(Fulcrum::new(1, 1, DVec2::new(0.25, 0.5), "A", FulcrumType::Room));
        state
            .graph
            .upsert_fulcrum(Fulcrum::new(2, 1, DVec2::new(0.75, 0.5), "B", FulcrumType::Room));
        state
    }

    #[test]
    fn release_near_target_opens_create_modal() {
        let mut state = state();
        assert!(begin(&mut state, 1));
        update_preview(&mut state, DVec2::new(500.0, 310.0));
        assert_eq!(
            state.editor.gesture.temp_connection().map(|t| t.to_pos),
            Some(DVec2::new(500.0, 310.0))
        );

        let outcome = finish(&mut state, DVec2::new(610.0, 310.0));

        assert_eq!(outcome, ConnectOutcome::Committed { from: 1, to: 2 });
        assert!(state.modals.connection.visible);
        assert_eq!(state.modals.connection.mode, ModalMode::Create);
        assert!(state.modals.connection.form.bidirectional);
        assert!(state.editor.gesture.is_idle());
    }

    #[test]
    fn release_far_away_discards() {
        let mut state = state();
        begin(&mut state, 1);

        let outcome = finish(&mut state, DVec2::new(400.0, 100.0));

        assert_eq!(outcome, ConnectOutcome::Discarded);
        assert!(!state.modals.connection.visible);
        assert!(state.editor.gesture.temp_connection().is_none());
    }
}
