//! Handler für Modals, Fehlermeldungen und Optionen.

use glam::DVec2;

use crate::app::forms::{ConnectionForm, FulcrumForm};
use crate::app::modals::ModalAction;
use crate::app::services::EditorServices;
use crate::app::use_cases;
use crate::app::use_cases::modals::FulcrumSaved;
use crate::app::{AppState, EditorEvent};
use crate::core::{EditorViewport, GridSettings, InterfloorRow};
use crate::shared::EditorOptions;

/// Öffnet das Anlegen-Modal für einen Fulcrum.
pub fn open_fulcrum_create(state: &mut AppState, position: DVec2) {
    use_cases::modals::open_fulcrum_create(state, position);
}

/// Öffnet das Bearbeiten-Modal für einen Fulcrum.
pub fn open_fulcrum_edit(state: &mut AppState, fulcrum_id: u64) {
    use_cases::modals::open_fulcrum_edit(state, fulcrum_id);
}

/// Öffnet das Anlegen-Modal für eine Verbindung.
pub fn open_connection_create(state: &mut AppState, from: u64, to: u64) {
    use_cases::modals::open_connection_create(state, from, to);
}

/// Öffnet das Bearbeiten-Modal für eine Verbindung.
pub fn open_connection_edit(state: &mut AppState, from: u64, to: u64) {
    use_cases::modals::open_connection_edit(state, from, to);
}

/// Speichert das Fulcrum-Formular.
pub fn submit_fulcrum(
    state: &mut AppState,
    services: &mut EditorServices,
    form: FulcrumForm,
) -> anyhow::Result<()> {
    match use_cases::modals::submit_fulcrum_form(state, services.backend.as_mut(), form)? {
        Some(FulcrumSaved::Created(id)) => services.emit(EditorEvent::FulcrumCreated { id }),
        Some(FulcrumSaved::Updated(id)) => services.emit(EditorEvent::FulcrumUpdated { id }),
        None => {}
    }
    Ok(())
}

/// Übernimmt eine geänderte Zeile des Stockwerk-Panels.
pub fn update_interfloor_row(state: &mut AppState, row: InterfloorRow) {
    state.modals.apply(ModalAction::UpdateInterfloorRow(row));
}

/// Löscht den Fulcrum des Bearbeiten-Modals.
pub fn delete_fulcrum(state: &mut AppState, services: &mut EditorServices) -> anyhow::Result<()> {
    if let Some(id) = use_cases::modals::delete_fulcrum(state, services.backend.as_mut())? {
        services.emit(EditorEvent::FulcrumDeleted { id });
    }
    Ok(())
}

/// Schließt das Fulcrum-Modal.
pub fn close_fulcrum_modal(state: &mut AppState) {
    state.modals.apply(ModalAction::CloseFulcrum);
}

/// Speichert das Verbindungs-Formular.
pub fn submit_connection(
    state: &mut AppState,
    services: &mut EditorServices,
    form: ConnectionForm,
) -> anyhow::Result<()> {
    if let Some((from, to)) =
        use_cases::modals::submit_connection_form(state, services.backend.as_mut(), form)?
    {
        services.emit(EditorEvent::ConnectionSaved { from, to });
    }
    Ok(())
}

/// Löscht die Verbindung des Bearbeiten-Modals.
pub fn delete_connection(state: &mut AppState, services: &mut EditorServices) -> anyhow::Result<()> {
    if let Some((from, to)) = use_cases::modals::delete_connection(state, services.backend.as_mut())? {
        services.emit(EditorEvent::ConnectionDeleted { from, to });
    }
    Ok(())
}

/// Schließt das Verbindungs-Modal.
pub fn close_connection_modal(state: &mut AppState) {
    state.modals.apply(ModalAction::CloseConnection);
}

/// Entfernt die blockierende Fehlermeldung.
pub fn dismiss_error(state: &mut AppState) {
    state.ui.error_message = None;
}

/// Übernimmt neue Optionen und persistiert sie in der Konfigurationsdatei.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    let viewport = &state.view.viewport;
    if viewport.min_scale() != options.scale_min || viewport.max_scale() != options.scale_max {
        let mut fresh = EditorViewport::with_limits(options.scale_min, options.scale_max);
        fresh.offset = viewport.offset;
        fresh.scale = viewport.scale.clamp(fresh.min_scale(), fresh.max_scale());
        state.view.viewport = fresh;
    }
    if options.grid_step_bounds() != state.options.grid_step_bounds() {
        let mut grid = GridSettings::with_bounds(options.grid_step_bounds());
        grid.enabled = state.view.grid.enabled;
        grid.set_offset(state.view.grid.offset());
        state.view.grid = grid;
    }
    state.view.pending_resize.set_delay(options.resize_debounce_ms);

    state.options = options;
    let path = EditorOptions::config_path();
    state.options.save_to_file(&path)
}
