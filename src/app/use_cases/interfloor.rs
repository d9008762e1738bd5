//! Stockwerk-übergreifendes Panel: Bereich laden, Zeilen bauen, Zeilen speichern.

use crate::app::modals::ModalAction;
use crate::app::state::{LoadTarget, LoadTicket};
use crate::app::AppState;
use crate::backend::{BackendError, FloorPlanBackend};
use crate::core::{
    build_interfloor_rows, normalize_interfloor_weight, AreaGraph, ConnectionDraft, InterfloorRow,
    WaypointGraph,
};

use super::graph;

/// Einzelne Zeilen konnten nicht synchronisiert werden.
#[derive(Debug, thiserror::Error)]
#[error("{} Stockwerk-Verbindung(en) konnten nicht gespeichert werden (Fulcrums {})", .failed.len(), failed_ids(.failed))]
pub struct InterfloorSyncError {
    /// Ziel-Fulcrum der Zeile und der erste Fehler dieser Zeile
    pub failed: Vec<(u64, BackendError)>,
}

fn failed_ids(failed: &[(u64, BackendError)]) -> String {
    failed
        .iter()
        .map(|(id, _)| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lädt Stockwerke und Fulcrums eines Bereichs.
pub fn fetch_area_graph(
    backend: &mut dyn FloorPlanBackend,
    area_id: u64,
) -> Result<AreaGraph, BackendError> {
    let floors = backend.floors_by_area(area_id)?;
    let records = backend.fulcrums_by_area(area_id)?;
    Ok(AreaGraph::from_records(area_id, &floors, records))
}

/// Vergibt ein Ticket für das Panel des offenen Fulcrum-Modals.
pub fn begin_load(state: &mut AppState) -> Option<(LoadTicket, u64)> {
    let area_id = state.floor.as_ref()?.mapping_area_id;
    let ticket = state.loads.begin(LoadTarget::Area(area_id));
    state.modals.apply(ModalAction::SetInterfloorTicket(ticket));
    Some((ticket, area_id))
}

/// Übernimmt einen geladenen Bereichsgraphen, sofern Ticket und Modal noch passen.
pub fn apply_area_graph(
    state: &mut AppState,
    ticket: LoadTicket,
    focal: Option<u64>,
    area: &AreaGraph,
) -> bool {
    if !state.loads.is_current(&ticket) {
        log::debug!("Veraltete Bereichsdaten verworfen ({:?})", ticket);
        return false;
    }
    state.loads.finish(&ticket);

    let modal = &state.modals.fulcrum;
    if !modal.visible || modal.interfloor_ticket != Some(ticket) || modal.fulcrum_id != focal {
        log::debug!("Bereichsdaten ohne passendes Modal verworfen");
        return false;
    }
    let Some(floor_id) = state.floor_id() else {
        return false;
    };
    let rows = build_interfloor_rows(focal, floor_id, area);
    log::debug!("{} Stockwerk-Zeilen geladen", rows.len());
    state.modals.apply(ModalAction::SetInterfloorRows(rows));
    true
}

/// Synchronisiert alle Zeilen für `focal`.
///
/// Pro Richtung: aktiviert → alte Kante entfernen und mit Gewicht (≥ 1) neu
/// anlegen; deaktiviert → vorhandene Kante entfernen. Eine fehlerhafte Zeile
/// bricht nur diese Zeile ab, die übrigen werden weiter gespeichert.
pub fn sync_rows(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    focal: u64,
    rows: &[InterfloorRow],
) -> Result<(), InterfloorSyncError> {
    let mut failed = Vec::new();
    for row in rows.iter().filter(|r| r.needs_sync()) {
        if let Err(e) = sync_row(graph, backend, focal, row) {
            log::warn!("Stockwerk-Verbindung zu Fulcrum {} fehlgeschlagen: {}", row.fulcrum_id, e);
            failed.push((row.fulcrum_id, e));
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(InterfloorSyncError { failed })
    }
}

fn sync_row(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    focal: u64,
    row: &InterfloorRow,
) -> Result<(), BackendError> {
    sync_direction(
        graph,
        backend,
        (focal, row.fulcrum_id),
        row.forward_enabled,
        row.forward_weight,
        row.forward_existing,
    )?;
    sync_direction(
        graph,
        backend,
        (row.fulcrum_id, focal),
        row.backward_enabled,
        row.backward_weight,
        row.backward_existing,
    )
}

fn sync_direction(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    (from, to): (u64, u64),
    enabled: bool,
    weight: f64,
    existing: bool,
) -> Result<(), BackendError> {
    if enabled {
        let draft = ConnectionDraft::new(to, normalize_interfloor_weight(weight));
        graph::replace_connection(graph, backend, from, draft, existing)
    } else if existing {
        graph::remove_connection(graph, backend, from, to)
    } else {
        Ok(())
    }
}
