//! Handler für Stockwerk-Laden, Stockwerk-Panel und Grundriss.

use anyhow::Context;

use crate::app::services::EditorServices;
use crate::app::state::LoadTicket;
use crate::app::use_cases;
use crate::app::{AppState, EditorEvent};
use crate::core::{AreaGraph, Floor, FulcrumWithConnections};

/// Lädt ein Stockwerk über das Backend.
pub fn load(state: &mut AppState, services: &mut EditorServices, floor_id: u64) -> anyhow::Result<()> {
    let applied = use_cases::floor::load_floor(
        state,
        services.backend.as_mut(),
        services.offsets.as_mut(),
        floor_id,
    )?;
    if applied {
        emit_loaded(state, services);
    }
    Ok(())
}

/// Übernimmt asynchron geladene Stockwerksdaten.
pub fn apply_data(
    state: &mut AppState,
    services: &mut EditorServices,
    ticket: LoadTicket,
    floor: Floor,
    fulcrums: Vec<FulcrumWithConnections>,
) {
    if use_cases::floor::apply_floor_data(state, services.offsets.as_mut(), ticket, floor, fulcrums) {
        emit_loaded(state, services);
    }
}

fn emit_loaded(state: &AppState, services: &mut EditorServices) {
    if let Some(floor_id) = state.floor_id() {
        services.emit(EditorEvent::FloorLoaded {
            floor_id,
            fulcrums: state.fulcrum_count(),
        });
    }
}

/// Lädt den Bereichsgraphen für das Stockwerk-Panel des offenen Fulcrum-Modals.
///
/// Fehler sind nicht blockierend: das Panel bleibt leer.
pub fn load_interfloor_rows(state: &mut AppState, services: &mut EditorServices, focal: Option<u64>) {
    let Some((ticket, area_id)) = use_cases::interfloor::begin_load(state) else {
        return;
    };
    match use_cases::interfloor::fetch_area_graph(services.backend.as_mut(), area_id) {
        Ok(area) => {
            use_cases::interfloor::apply_area_graph(state, ticket, focal, &area);
        }
        Err(e) => {
            state.loads.finish(&ticket);
            log::warn!("Stockwerk-Panel konnte nicht geladen werden: {}", e);
            state.ui.status_message = Some(format!("Stockwerk-Verbindungen nicht verfügbar: {e}"));
        }
    }
}

/// Übernimmt einen asynchron geladenen Bereichsgraphen.
pub fn apply_interfloor(state: &mut AppState, ticket: LoadTicket, focal: Option<u64>, area: &AreaGraph) {
    use_cases::interfloor::apply_area_graph(state, ticket, focal, area);
}

/// Setzt eine hochgeladene Datei als Grundriss.
pub fn upload_plan(state: &mut AppState, bytes: &[u8], mime: &str) -> anyhow::Result<()> {
    use_cases::floor::set_plan_from_upload(state, bytes, mime)
        .context("Grundriss konnte nicht übernommen werden")
}

/// Entfernt den Grundriss lokal.
pub fn clear_plan(state: &mut AppState) {
    use_cases::floor::clear_plan(state);
}

/// Speichert den Grundriss.
pub fn save_plan(state: &mut AppState, services: &mut EditorServices) -> anyhow::Result<()> {
    let floor_id = use_cases::floor::save_plan(state, services.backend.as_mut())?;
    state.ui.status_message = Some("Grundriss gespeichert".to_string());
    services.emit(EditorEvent::FloorPlanSaved { floor_id });
    Ok(())
}
