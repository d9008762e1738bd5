//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::services::EditorServices;
use super::{AppCommand, AppIntent, AppState, EditorEvent};
use crate::backend::FloorPlanBackend;
use crate::shared::RenderScene;
use crate::storage::GridOffsetStore;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
pub struct AppController {
    services: EditorServices,
}

impl AppController {
    /// Erstellt einen Controller mit Backend und Offset-Speicher.
    pub fn new(backend: Box<dyn FloorPlanBackend>, offsets: Box<dyn GridOffsetStore>) -> Self {
        Self {
            services: EditorServices::new(backend, offsets),
        }
    }

    /// Registriert den Listener für Editor-Events.
    pub fn set_event_listener(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.services.set_listener(listener);
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Bricht beim ersten fehlgeschlagenen Command ab.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    ///
    /// Fehler landen zusätzlich als blockierende Meldung im UI-State.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);

        let result = self.dispatch(state, command);
        if let Err(e) = &result {
            let message = format!("{e:#}");
            log::error!("Command fehlgeschlagen: {}", message);
            state.ui.error_message = Some(message.clone());
            self.services.emit(EditorEvent::ErrorRaised { message });
        }
        result
    }

    fn dispatch(&mut self, state: &mut AppState, command: AppCommand) -> anyhow::Result<()> {
        use super::handlers;
        let services = &mut self.services;

        match command {
            // === Viewport ===
            AppCommand::ScheduleResize {
                origin,
                size,
                now_ms,
            } => handlers::view::schedule_resize(state, origin, size, now_ms),
            AppCommand::FlushResize { now_ms } => handlers::view::flush_resize(state, now_ms),
            AppCommand::BeginPan { local } => handlers::view::begin_pan(state, local),
            AppCommand::PanTo { local } => handlers::view::pan_to(state, local),
            AppCommand::EndPan => handlers::view::end_pan(state),
            AppCommand::ZoomAtCursor { local, delta_y } => {
                handlers::view::zoom_at_cursor(state, local, delta_y)
            }
            AppCommand::ZoomBy { factor } => handlers::view::zoom_by(state, factor),
            AppCommand::ResetView => handlers::view::reset_view(state),

            // === Raster ===
            AppCommand::ToggleGrid => handlers::grid::toggle(state),
            AppCommand::IncreaseGridStep => handlers::grid::increase_step(state, services),
            AppCommand::DecreaseGridStep => handlers::grid::decrease_step(state, services),
            AppCommand::ResetGridOffset => handlers::grid::reset_offset(state, services),
            AppCommand::PressGridHandle { position, now_ms } => {
                handlers::grid::press_handle(state, services, position, now_ms)
            }
            AppCommand::MoveGridHandle {
                position,
                movement,
                now_ms,
            } => handlers::grid::move_handle(state, services, position, movement, now_ms),
            AppCommand::ReleaseGridHandle => handlers::grid::release_handle(state),
            AppCommand::SetPointerCaptured { captured, now_ms } => {
                handlers::grid::set_pointer_captured(state, captured, now_ms)
            }

            // === Drag-to-Connect ===
            AppCommand::BeginConnectDrag { from } => handlers::connect::begin(state, from),
            AppCommand::UpdateConnectPreview { pointer } => {
                handlers::connect::update_preview(state, pointer)
            }
            AppCommand::FinishConnectDrag { pointer } => {
                handlers::connect::finish(state, services, pointer)
            }
            AppCommand::CancelGesture => handlers::connect::cancel(state),

            // === Stockwerk & Grundriss ===
            AppCommand::LoadFloor { floor_id } => handlers::floor::load(state, services, floor_id)?,
            AppCommand::ApplyFloorData {
                ticket,
                floor,
                fulcrums,
            } => handlers::floor::apply_data(state, services, ticket, floor, fulcrums),
            AppCommand::LoadInterfloorRows { focal } => {
                handlers::floor::load_interfloor_rows(state, services, focal)
            }
            AppCommand::ApplyInterfloorData {
                ticket,
                focal,
                area,
            } => handlers::floor::apply_interfloor(state, ticket, focal, &area),
            AppCommand::SetFloorPlanFromUpload { bytes, mime } => {
                handlers::floor::upload_plan(state, &bytes, &mime)?
            }
            AppCommand::ClearFloorPlan => handlers::floor::clear_plan(state),
            AppCommand::SaveFloorPlan => handlers::floor::save_plan(state, services)?,

            // === Modals ===
            AppCommand::OpenFulcrumCreate { position } => {
                handlers::dialog::open_fulcrum_create(state, position)
            }
            AppCommand::OpenFulcrumEdit { fulcrum_id } => {
                handlers::dialog::open_fulcrum_edit(state, fulcrum_id)
            }
            AppCommand::OpenConnectionCreate { from, to } => {
                handlers::dialog::open_connection_create(state, from, to)
            }
            AppCommand::OpenConnectionEdit { from, to } => {
                handlers::dialog::open_connection_edit(state, from, to)
            }
            AppCommand::SubmitFulcrumForm { form } => {
                handlers::dialog::submit_fulcrum(state, services, form)?
            }
            AppCommand::UpdateInterfloorRow { row } => {
                handlers::dialog::update_interfloor_row(state, row)
            }
            AppCommand::DeleteFulcrum => handlers::dialog::delete_fulcrum(state, services)?,
            AppCommand::CloseFulcrumModal => handlers::dialog::close_fulcrum_modal(state),
            AppCommand::SubmitConnectionForm { form } => {
                handlers::dialog::submit_connection(state, services, form)?
            }
            AppCommand::DeleteConnection => handlers::dialog::delete_connection(state, services)?,
            AppCommand::CloseConnectionModal => handlers::dialog::close_connection_modal(state),

            // === Sonstiges ===
            AppCommand::DismissError => handlers::dialog::dismiss_error(state),
            AppCommand::ApplyOptions { options } => {
                handlers::dialog::apply_options(state, *options)?
            }
        }

        Ok(())
    }

    /// Baut die Render-Szene aus dem aktuellen State.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
