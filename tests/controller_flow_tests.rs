use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use buildmap_floor_editor::app::gestures::{RecordingPointerHost, SharedPointerHost};
use buildmap_floor_editor::app::state::LoadTarget;
use buildmap_floor_editor::app::ModalMode;
use buildmap_floor_editor::backend::BackendOperation;
use buildmap_floor_editor::{
    AppCommand, AppController, AppIntent, AppState, EditorEvent, Floor, Fulcrum, FulcrumType,
    InMemoryBackend, MemoryGridOffsetStore, PointerButton,
};
use glam::DVec2;

struct Harness {
    controller: AppController,
    state: AppState,
    backend: InMemoryBackend,
    offsets: MemoryGridOffsetStore,
    events: Rc<RefCell<Vec<EditorEvent>>>,
}

impl Harness {
    fn intent(&mut self, intent: AppIntent) -> anyhow::Result<()> {
        self.controller.handle_intent(&mut self.state, intent)
    }

    fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }
}

/// Bereich 9 mit "Ground" (A, B, Treppe) und "Upper" (Treppe oben).
/// Container 800x600 bei (0, 0), Plan 800x600: Seiten- = Display-Koordinaten.
fn harness_with_host(host: Option<SharedPointerHost>) -> Harness {
    let backend = InMemoryBackend::new();
    backend.insert_floor(Floor {
        id: 1,
        mapping_area_id: 9,
        name: "Ground".into(),
        level: 0,
        ..Default::default()
    });
    backend.insert_floor(Floor {
        id: 2,
        mapping_area_id: 9,
        name: "Upper".into(),
        level: 1,
        ..Default::default()
    });
    backend.insert_fulcrum(Fulcrum::new(1, 1, DVec2::new(0.25, 0.5), "A", FulcrumType::Room));
    backend.insert_fulcrum(Fulcrum::new(2, 1, DVec2::new(0.75, 0.5), "B", FulcrumType::Room));
    backend.insert_fulcrum(Fulcrum::new(10, 1, DVec2::new(0.5, 0.8), "Stairs G", FulcrumType::Stairs));
    backend.insert_fulcrum(Fulcrum::new(20, 2, DVec2::new(0.5, 0.8), "Stairs U", FulcrumType::Stairs));
    backend.insert_connection(10, 20, 2.5);

    let offsets = MemoryGridOffsetStore::new();
    let mut controller = AppController::new(Box::new(backend.clone()), Box::new(offsets.clone()));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.set_event_listener(move |event| sink.borrow_mut().push(event.clone()));

    let mut state = AppState::new();
    if let Some(host) = host {
        state = state.with_pointer_host(host);
    }

    let mut harness = Harness {
        controller,
        state,
        backend,
        offsets,
        events,
    };
    harness
        .intent(AppIntent::ViewportResized {
            origin: DVec2::ZERO,
            size: DVec2::new(800.0, 600.0),
            now_ms: 0.0,
        })
        .expect("Resize sollte ohne Fehler durchlaufen");
    harness
        .intent(AppIntent::FloorOpenRequested { floor_id: 1 })
        .expect("Stockwerk 1 sollte laden");
    harness
}

fn harness() -> Harness {
    harness_with_host(None)
}

#[test]
fn test_floor_open_loads_graph_and_emits_event() {
    let h = harness();

    assert_eq!(h.state.floor_id(), Some(1));
    assert_eq!(h.state.fulcrum_count(), 3);
    assert!(h
        .events()
        .contains(&EditorEvent::FloorLoaded { floor_id: 1, fulcrums: 3 }));
}

#[test]
fn test_right_click_create_places_fulcrum_at_click_position() {
    let mut h = harness();

    h.intent(AppIntent::ContextMenuRequested {
        pos: DVec2::new(320.0, 360.0),
    })
    .expect("Rechtsklick sollte ohne Fehler durchlaufen");

    assert!(h.state.modals.fulcrum.visible);
    assert_eq!(h.state.modals.fulcrum.mode, ModalMode::Create);
    let mut form = h.state.modals.fulcrum.form.clone();
    assert_relative_eq!(form.x.expect("x vorbelegt"), 0.4, epsilon = 1e-9);
    assert_relative_eq!(form.y.expect("y vorbelegt"), 0.6, epsilon = 1e-9);

    form.name = "Lobby".into();
    h.intent(AppIntent::FulcrumFormSubmitted { form })
        .expect("Anlegen sollte gelingen");

    let created = h
        .events()
        .iter()
        .find_map(|e| match e {
            EditorEvent::FulcrumCreated { id } => Some(*id),
            _ => None,
        })
        .expect("FulcrumCreated erwartet");
    let fulcrum = h.state.graph.fulcrum(created).expect("Fulcrum im Graphen");
    assert_eq!(fulcrum.name, "Lobby");
    assert_eq!(fulcrum.kind, FulcrumType::Room);
    assert_relative_eq!(fulcrum.position.x, 0.4, epsilon = 1e-9);
    assert_relative_eq!(fulcrum.position.y, 0.6, epsilon = 1e-9);
    assert!(!h.state.modals.fulcrum.visible);
}

#[test]
fn test_drag_to_connect_commits_near_target_and_saves_both_directions() {
    let mut h = harness();

    h.intent(AppIntent::PointerPressed {
        pos: DVec2::new(202.0, 301.0),
        button: PointerButton::Primary,
    })
    .expect("Press sollte durchlaufen");
    h.intent(AppIntent::PointerMoved {
        pos: DVec2::new(500.0, 300.0),
        movement: DVec2::new(298.0, -1.0),
        now_ms: 10.0,
    })
    .expect("Move sollte durchlaufen");
    assert!(h.state.editor.gesture.temp_connection().is_some());

    h.intent(AppIntent::PointerReleased {
        pos: DVec2::new(590.0, 305.0),
    })
    .expect("Release sollte durchlaufen");

    assert!(h.state.editor.gesture.is_idle());
    assert!(h
        .events()
        .contains(&EditorEvent::ConnectionCommitted { from: 1, to: 2 }));
    assert_eq!(h.state.modals.connection.endpoints(), Some((1, 2)));

    let form = h.state.modals.connection.form.clone();
    h.intent(AppIntent::ConnectionFormSubmitted { form })
        .expect("Speichern sollte gelingen");

    assert_eq!(h.backend.connection(1, 2), Some(1.0));
    assert_eq!(h.backend.connection(2, 1), Some(1.0));
    let groups = h.state.graph.connection_groups();
    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_bidirectional());
}

#[test]
fn test_drag_to_connect_far_release_discards() {
    let mut h = harness();

    h.intent(AppIntent::PointerPressed {
        pos: DVec2::new(200.0, 300.0),
        button: PointerButton::Primary,
    })
    .expect("Press sollte durchlaufen");
    h.intent(AppIntent::PointerReleased {
        pos: DVec2::new(450.0, 100.0),
    })
    .expect("Release sollte durchlaufen");

    assert!(h.state.editor.gesture.is_idle());
    assert!(!h.state.modals.connection.visible);
    assert!(h.backend.calls().iter().all(|op| *op != BackendOperation::AddConnection));
}

#[test]
fn test_grid_step_buttons_double_and_clamp() {
    let mut h = harness();

    h.intent(AppIntent::GridStepIncreased).expect("Schritt 1");
    h.intent(AppIntent::GridStepIncreased).expect("Schritt 2");
    assert_relative_eq!(h.state.view.grid.step(), 0.16, epsilon = 1e-12);

    h.intent(AppIntent::GridStepIncreased).expect("Schritt 3");
    assert!(h.state.view.grid.step() <= 0.2);
    assert_relative_eq!(h.state.view.grid.step(), 0.2, epsilon = 1e-12);
}

#[test]
fn test_interfloor_row_shows_weight_and_disabling_removes_edge() {
    let mut h = harness();

    h.intent(AppIntent::ContextMenuRequested {
        pos: DVec2::new(401.0, 479.0),
    })
    .expect("Rechtsklick sollte durchlaufen");

    assert_eq!(h.state.modals.fulcrum.mode, ModalMode::Edit);
    assert_eq!(h.state.modals.fulcrum.fulcrum_id, Some(10));
    let mut form = h.state.modals.fulcrum.form.clone();
    let row = form
        .interfloor
        .iter_mut()
        .find(|r| r.fulcrum_id == 20)
        .expect("Zeile für Stairs U erwartet");
    assert!(row.forward_enabled);
    assert_relative_eq!(row.forward_weight, 2.5);
    assert_eq!(row.floor_name, "Upper");

    row.forward_enabled = false;
    h.intent(AppIntent::FulcrumFormSubmitted { form })
        .expect("Speichern sollte gelingen");

    assert_eq!(h.backend.connection(10, 20), None);
    assert!(!h.state.graph.has_connection(10, 20));
    assert!(h.events().contains(&EditorEvent::FulcrumUpdated { id: 10 }));
}

#[test]
fn test_backend_failure_keeps_modal_open_and_raises_error() {
    let mut h = harness();
    h.intent(AppIntent::ContextMenuRequested {
        pos: DVec2::new(200.0, 300.0),
    })
    .expect("Rechtsklick sollte durchlaufen");
    h.backend.fail_next(BackendOperation::UpdateFulcrum, 1);

    let mut form = h.state.modals.fulcrum.form.clone();
    form.name = "Renamed".into();
    let result = h.intent(AppIntent::FulcrumFormSubmitted { form });

    assert!(result.is_err());
    assert!(h.state.ui.error_message.is_some());
    assert!(h.state.modals.fulcrum.visible);
    assert_eq!(
        h.state.graph.fulcrum(1).map(|f| f.name.as_str()),
        Some("A")
    );
    assert!(h
        .events()
        .iter()
        .any(|e| matches!(e, EditorEvent::ErrorRaised { .. })));

    h.intent(AppIntent::ErrorDismissed).expect("Bestätigen");
    assert!(h.state.ui.error_message.is_none());
}

#[test]
fn test_stale_floor_data_is_ignored() {
    let mut h = harness();
    let stale = h.state.loads.begin(LoadTarget::Floor(2));
    let _current = h.state.loads.begin(LoadTarget::Floor(2));

    h.intent(AppIntent::FloorDataReceived {
        ticket: stale,
        floor: Floor {
            id: 2,
            mapping_area_id: 9,
            ..Default::default()
        },
        fulcrums: Vec::new(),
    })
    .expect("Veraltete Daten sollten still verworfen werden");

    assert_eq!(h.state.floor_id(), Some(1));
    assert_eq!(h.state.fulcrum_count(), 3);
}

#[test]
fn test_escape_cancels_connect_drag_and_releases_subscription() {
    let concrete = Rc::new(RefCell::new(RecordingPointerHost::new(true)));
    let shared: SharedPointerHost = concrete.clone();
    let mut h = harness_with_host(Some(shared));

    h.intent(AppIntent::PointerPressed {
        pos: DVec2::new(200.0, 300.0),
        button: PointerButton::Primary,
    })
    .expect("Press sollte durchlaufen");
    assert_eq!(concrete.borrow().active_subscriptions, 1);

    h.intent(AppIntent::EscapePressed).expect("Escape");

    assert!(h.state.editor.gesture.is_idle());
    assert_eq!(concrete.borrow().active_subscriptions, 0);
}

#[test]
fn test_pointer_leaving_canvas_releases_every_gesture() {
    let concrete = Rc::new(RefCell::new(RecordingPointerHost::new(true)));
    let shared: SharedPointerHost = concrete.clone();
    let mut h = harness_with_host(Some(shared));
    h.intent(AppIntent::GridToggled).expect("Raster an");

    // Pan auf freier Fläche
    h.intent(AppIntent::PointerPressed {
        pos: DVec2::new(100.0, 100.0),
        button: PointerButton::Primary,
    })
    .expect("Pan-Start");
    assert_eq!(concrete.borrow().active_subscriptions, 1);
    h.intent(AppIntent::PointerLeft).expect("Verlassen");
    assert!(h.state.editor.gesture.is_idle());
    assert_eq!(concrete.borrow().active_subscriptions, 0);

    // Drag-to-Connect von A
    h.intent(AppIntent::PointerPressed {
        pos: DVec2::new(200.0, 300.0),
        button: PointerButton::Primary,
    })
    .expect("Connect-Start");
    assert_eq!(concrete.borrow().active_subscriptions, 1);
    h.intent(AppIntent::PointerLeft).expect("Verlassen");
    assert!(h.state.editor.gesture.is_idle());
    assert_eq!(concrete.borrow().active_subscriptions, 0);
    assert!(!h.state.modals.connection.visible);

    // Raster-Griff mit Capture
    h.intent(AppIntent::GridHandlePressed {
        pos: DVec2::new(0.0, 0.0),
        now_ms: 5000.0,
    })
    .expect("Griff-Druck");
    h.intent(AppIntent::PointerMoved {
        pos: DVec2::new(24.0, 0.0),
        movement: DVec2::new(24.0, 0.0),
        now_ms: 5010.0,
    })
    .expect("Griff-Bewegung");
    assert_eq!(concrete.borrow().active_subscriptions, 1);
    assert!(concrete.borrow().captured);
    h.intent(AppIntent::PointerLeft).expect("Verlassen");
    assert!(h.state.editor.gesture.is_idle());
    assert_eq!(concrete.borrow().active_subscriptions, 0);
    assert!(!concrete.borrow().captured);
}

#[test]
fn test_grid_handle_drag_persists_offset_and_emits_event() {
    let mut h = harness();
    h.intent(AppIntent::GridToggled).expect("Raster an");

    h.intent(AppIntent::GridHandlePressed {
        pos: DVec2::new(400.0, 300.0),
        now_ms: 1000.0,
    })
    .expect("Griff-Druck");
    h.intent(AppIntent::PointerMoved {
        pos: DVec2::new(424.0, 300.0),
        movement: DVec2::new(24.0, 0.0),
        now_ms: 1010.0,
    })
    .expect("Griff-Bewegung");
    h.intent(AppIntent::PointerReleased {
        pos: DVec2::new(424.0, 300.0),
    })
    .expect("Griff loslassen");

    let offset = h.state.view.grid.offset();
    assert_relative_eq!(offset.x, 0.03, epsilon = 1e-9);
    assert_relative_eq!(offset.y, 0.0, epsilon = 1e-9);
    assert!(h.offsets.raw(1).is_some());
    assert!(h
        .events()
        .iter()
        .any(|e| matches!(e, EditorEvent::GridOffsetChanged { floor_id: 1, .. })));
    assert!(h.state.editor.gesture.is_idle());
}

#[test]
fn test_commands_are_logged_in_order() {
    let mut h = harness();

    h.intent(AppIntent::ResetViewRequested).expect("Reset");

    assert!(matches!(
        h.state.command_log.entries().last(),
        Some(AppCommand::ResetView)
    ));
}
