//! Stockwerk laden und Grundriss setzen, entfernen oder speichern.

use std::sync::Arc;

use anyhow::{bail, Context};

use super::{connect, grid};
use crate::app::modals::ModalAction;
use crate::app::state::{LoadTarget, LoadTicket};
use crate::app::AppState;
use crate::backend::FloorPlanBackend;
use crate::core::{Floor, FloorUpdate, FulcrumWithConnections, WaypointGraph};
use crate::storage::GridOffsetStore;
use crate::svg::{self, FloorPlanError, DEFAULT_PLAN_SIZE};

/// Beginnt das Laden eines Stockwerks; ältere Ladevorgänge werden damit veraltet.
pub fn begin_load(state: &mut AppState, floor_id: u64) -> LoadTicket {
    state.loads.begin(LoadTarget::Floor(floor_id))
}

/// Lädt Stockwerk und Fulcrums synchron über das Backend.
pub fn load_floor(
    state: &mut AppState,
    backend: &mut dyn FloorPlanBackend,
    store: &mut dyn GridOffsetStore,
    floor_id: u64,
) -> anyhow::Result<bool> {
    let ticket = begin_load(state, floor_id);
    let floor = backend
        .floor_by_id(floor_id)
        .with_context(|| format!("Stockwerk {floor_id} konnte nicht geladen werden"))?;
    let records = backend
        .fulcrums_by_floor(floor_id)
        .with_context(|| format!("Fulcrums von Stockwerk {floor_id} konnten nicht geladen werden"))?;
    Ok(apply_floor_data(state, store, ticket, floor, records))
}

/// Übernimmt geladene Stockwerksdaten, sofern das Ticket noch aktuell ist.
///
/// Setzt Viewport, Gesten und Modals zurück und liest den Raster-Offset.
pub fn apply_floor_data(
    state: &mut AppState,
    store: &mut dyn GridOffsetStore,
    ticket: LoadTicket,
    floor: Floor,
    records: Vec<FulcrumWithConnections>,
) -> bool {
    if !state.loads.is_current(&ticket) {
        log::debug!("Veraltete Stockwerksdaten verworfen ({:?})", ticket);
        return false;
    }
    state.loads.finish(&ticket);

    connect::cancel_gesture(state);
    state.modals.apply(ModalAction::CloseFulcrum);
    state.modals.apply(ModalAction::CloseConnection);

    state.graph = WaypointGraph::from_records(floor.id, records);
    set_plan(state, floor.has_plan().then(|| floor.svg_plan.clone()));
    state.view.viewport.reset();
    grid::restore_offset(state, store, floor.id);

    log::info!(
        "Stockwerk {} '{}' geladen: {} Fulcrums, {} Verbindungen",
        floor.id,
        floor.display_name(),
        state.graph.fulcrum_count(),
        state.graph.connection_count()
    );
    state.floor = Some(floor);
    true
}

/// Setzt eine hochgeladene Datei als Grundriss (noch nicht gespeichert).
pub fn set_plan_from_upload(
    state: &mut AppState,
    bytes: &[u8],
    mime: &str,
) -> Result<(), FloorPlanError> {
    let plan = svg::plan_from_upload(bytes, mime)?;
    state.svg_plan = Some(Arc::from(plan.svg));
    state.view.plan_size = plan.size;
    state.view.refit();
    log::info!("Grundriss übernommen ({:.0}x{:.0})", plan.size.x, plan.size.y);
    Ok(())
}

/// Entfernt den Grundriss lokal.
pub fn clear_plan(state: &mut AppState) {
    set_plan(state, None);
}

/// Speichert den aktuellen Grundriss und lädt das Stockwerk neu.
pub fn save_plan(state: &mut AppState, backend: &mut dyn FloorPlanBackend) -> anyhow::Result<u64> {
    let floor = state.floor.as_ref().context("Kein Stockwerk geladen")?;
    let plan = match state.svg_plan.as_deref() {
        Some(plan) if !plan.trim().is_empty() => plan.to_string(),
        _ => bail!("Kein Grundriss zum Speichern vorhanden"),
    };
    let floor_id = floor.id;
    let update = FloorUpdate::with_plan(floor, plan);
    backend
        .update_floor(floor_id, &update)
        .context("Grundriss konnte nicht gespeichert werden")?;
    let refreshed = backend
        .floor_by_id(floor_id)
        .context("Stockwerk konnte nach dem Speichern nicht neu geladen werden")?;
    state.floor = Some(refreshed);
    log::info!("Grundriss von Stockwerk {} gespeichert", floor_id);
    Ok(floor_id)
}

fn set_plan(state: &mut AppState, plan: Option<String>) {
    state.view.plan_size = plan
        .as_deref()
        .map(svg::plan_dimensions)
        .unwrap_or(DEFAULT_PLAN_SIZE);
    state.svg_plan = plan.map(Arc::from);
    state.view.refit();
}
