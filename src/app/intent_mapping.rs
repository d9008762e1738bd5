//! Mapping von UI-Intents auf mutierende App-Commands.
//!
//! Trefferprüfungen (Marker, Kanten, Raster-Griff) passieren hier, damit
//! Commands eindeutige Ziele tragen.

use glam::DVec2;

use super::events::PointerButton;
use super::gestures::ActiveGesture;
use super::{AppCommand, AppIntent, AppState};
use crate::core::coords::distance_to_segment;
use crate::core::SpatialIndex;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ViewportResized {
            origin,
            size,
            now_ms,
        } => vec![AppCommand::ScheduleResize {
            origin,
            size,
            now_ms,
        }],
        AppIntent::Tick { now_ms } => {
            if state.view.pending_resize.is_pending() {
                vec![AppCommand::FlushResize { now_ms }]
            } else {
                vec![]
            }
        }
        AppIntent::PointerPressed { pos, button } => pointer_pressed(state, pos, button),
        AppIntent::PointerMoved {
            pos,
            movement,
            now_ms,
        } => match &state.editor.gesture {
            ActiveGesture::None => vec![],
            ActiveGesture::Pan(_) => vec![AppCommand::PanTo {
                local: state.view.to_local(pos),
            }],
            ActiveGesture::Connect(_) => vec![AppCommand::UpdateConnectPreview { pointer: pos }],
            ActiveGesture::Grid(_) => vec![AppCommand::MoveGridHandle {
                position: state.view.to_normalized(pos),
                movement,
                now_ms,
            }],
        },
        AppIntent::PointerReleased { pos } => match &state.editor.gesture {
            ActiveGesture::None => vec![],
            ActiveGesture::Pan(_) => vec![AppCommand::EndPan],
            ActiveGesture::Connect(_) => vec![AppCommand::FinishConnectDrag { pointer: pos }],
            ActiveGesture::Grid(_) => vec![AppCommand::ReleaseGridHandle],
        },
        AppIntent::PointerLeft => {
            if state.editor.gesture.is_idle() {
                vec![]
            } else {
                vec![AppCommand::CancelGesture]
            }
        }
        AppIntent::WheelScrolled { pos, delta_y } => {
            let connecting = matches!(state.editor.gesture, ActiveGesture::Connect(_));
            if connecting || state.modals.any_visible() {
                vec![]
            } else {
                vec![AppCommand::ZoomAtCursor {
                    local: state.view.to_local(pos),
                    delta_y,
                }]
            }
        }
        AppIntent::ContextMenuRequested { pos } => context_menu(state, pos),
        AppIntent::EscapePressed => {
            if !state.editor.gesture.is_idle() {
                vec![AppCommand::CancelGesture]
            } else if state.modals.connection.visible {
                vec![AppCommand::CloseConnectionModal]
            } else if state.modals.fulcrum.visible {
                vec![AppCommand::CloseFulcrumModal]
            } else {
                vec![]
            }
        }
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomBy {
            factor: state.options.zoom_button_step,
        }],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomBy {
            factor: 1.0 / state.options.zoom_button_step,
        }],
        AppIntent::ResetViewRequested => vec![AppCommand::ResetView],

        AppIntent::GridToggled => vec![AppCommand::ToggleGrid],
        AppIntent::GridStepIncreased => vec![AppCommand::IncreaseGridStep],
        AppIntent::GridStepDecreased => vec![AppCommand::DecreaseGridStep],
        AppIntent::GridOffsetResetRequested => vec![AppCommand::ResetGridOffset],
        AppIntent::GridHandlePressed { pos, now_ms } => {
            if !state.view.grid.enabled || state.canvas_locked() {
                vec![]
            } else {
                vec![AppCommand::PressGridHandle {
                    position: state.view.to_normalized(pos),
                    now_ms,
                }]
            }
        }
        AppIntent::PointerCaptureChanged { captured, now_ms } => {
            vec![AppCommand::SetPointerCaptured { captured, now_ms }]
        }

        AppIntent::FloorOpenRequested { floor_id } => vec![
            AppCommand::CancelGesture,
            AppCommand::LoadFloor { floor_id },
        ],
        AppIntent::FloorDataReceived {
            ticket,
            floor,
            fulcrums,
        } => vec![AppCommand::ApplyFloorData {
            ticket,
            floor,
            fulcrums,
        }],
        AppIntent::InterfloorDataReceived {
            ticket,
            focal,
            area,
        } => vec![AppCommand::ApplyInterfloorData {
            ticket,
            focal,
            area,
        }],
        AppIntent::FloorPlanUploaded { bytes, mime } => {
            vec![AppCommand::SetFloorPlanFromUpload { bytes, mime }]
        }
        AppIntent::FloorPlanCleared => vec![AppCommand::ClearFloorPlan],
        AppIntent::FloorPlanSaveRequested => vec![AppCommand::SaveFloorPlan],

        AppIntent::FulcrumFormSubmitted { form } => vec![AppCommand::SubmitFulcrumForm { form }],
        AppIntent::InterfloorRowEdited { row } => vec![AppCommand::UpdateInterfloorRow { row }],
        AppIntent::FulcrumDeleteRequested => vec![AppCommand::DeleteFulcrum],
        AppIntent::FulcrumModalClosed => vec![AppCommand::CloseFulcrumModal],
        AppIntent::ConnectionFormSubmitted { form } => {
            vec![AppCommand::SubmitConnectionForm { form }]
        }
        AppIntent::ConnectionDeleteRequested => vec![AppCommand::DeleteConnection],
        AppIntent::ConnectionModalClosed => vec![AppCommand::CloseConnectionModal],
        AppIntent::ErrorDismissed => vec![AppCommand::DismissError],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}

fn pointer_pressed(state: &AppState, pos: DVec2, button: PointerButton) -> Vec<AppCommand> {
    if button != PointerButton::Primary || state.canvas_locked() {
        return vec![];
    }
    let local = state.view.to_local(pos);
    match marker_at(state, local) {
        Some(from) => vec![AppCommand::BeginConnectDrag { from }],
        None => vec![AppCommand::BeginPan { local }],
    }
}

fn context_menu(state: &AppState, pos: DVec2) -> Vec<AppCommand> {
    if state.canvas_locked() || state.floor.is_none() {
        return vec![];
    }
    let local = state.view.to_local(pos);

    if let Some(fulcrum_id) = marker_at(state, local) {
        return vec![
            AppCommand::OpenFulcrumEdit { fulcrum_id },
            AppCommand::LoadInterfloorRows {
                focal: Some(fulcrum_id),
            },
        ];
    }

    if let Some((from, to)) = edge_at(state, local) {
        return vec![AppCommand::OpenConnectionEdit { from, to }];
    }

    let normalized = state.view.to_normalized(pos);
    let inside = (0.0..=1.0).contains(&normalized.x) && (0.0..=1.0).contains(&normalized.y);
    if !inside {
        log::debug!("Rechtsklick außerhalb des Grundrisses ignoriert");
        return vec![];
    }
    vec![
        AppCommand::OpenFulcrumCreate {
            position: state.view.grid.snap_if_enabled(normalized),
        },
        AppCommand::LoadInterfloorRows { focal: None },
    ]
}

/// Fulcrum unter einem container-relativen Punkt.
fn marker_at(state: &AppState, local: DVec2) -> Option<u64> {
    let index = SpatialIndex::from_points(
        state
            .graph
            .positions()
            .map(|(id, position)| (id, state.view.screen_position(position))),
    );
    index
        .nearest_within(local, state.options.marker_hit_radius_px)
        .map(|hit| hit.fulcrum_id)
}

/// Nächste Kante unter einem container-relativen Punkt als `(from, to)`.
fn edge_at(state: &AppState, local: DVec2) -> Option<(u64, u64)> {
    let tolerance = state.options.edge_hit_tolerance_px;
    state
        .graph
        .connections()
        .filter_map(|connection| {
            let a = state.graph.fulcrum(connection.from)?;
            let b = state.graph.fulcrum(connection.to)?;
            let distance = distance_to_segment(
                local,
                state.view.screen_position(a.position),
                state.view.screen_position(b.position),
            );
            (distance <= tolerance).then_some((distance, connection.key()))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key)
}
