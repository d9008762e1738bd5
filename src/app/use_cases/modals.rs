//! Abläufe der Editor-Modals: Öffnen, Absenden, Löschen.
//!
//! Formulare werden lokal validiert, bevor das Backend angesprochen wird.
//! Backend-Fehler lassen das Modal offen.

use anyhow::Context;
use glam::DVec2;

use super::{graph, interfloor};
use crate::app::forms::{ConnectionForm, FulcrumForm};
use crate::app::modals::{ModalAction, ModalMode};
use crate::app::AppState;
use crate::backend::FloorPlanBackend;
use crate::core::ConnectionDraft;

/// Ergebnis eines gespeicherten Fulcrum-Formulars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulcrumSaved {
    Created(u64),
    Updated(u64),
}

/// Öffnet das Anlegen-Modal an `position` (normalisiert).
pub fn open_fulcrum_create(state: &mut AppState, position: DVec2) -> bool {
    let Some(floor_id) = state.floor_id() else {
        log::warn!("Kein Stockwerk geladen, Fulcrum kann nicht angelegt werden");
        return false;
    };
    state
        .modals
        .apply(ModalAction::OpenFulcrumCreate { floor_id, position });
    true
}

/// Öffnet das Bearbeiten-Modal für einen Fulcrum.
pub fn open_fulcrum_edit(state: &mut AppState, fulcrum_id: u64) -> bool {
    let Some(fulcrum) = state.graph.fulcrum(fulcrum_id).cloned() else {
        log::warn!("Fulcrum {} nicht gefunden", fulcrum_id);
        return false;
    };
    state.modals.apply(ModalAction::OpenFulcrumEdit { fulcrum });
    true
}

/// Öffnet das Anlegen-Modal für eine Verbindung.
pub fn open_connection_create(state: &mut AppState, from: u64, to: u64) {
    state
        .modals
        .apply(ModalAction::OpenConnectionCreate { from, to });
}

/// Öffnet das Bearbeiten-Modal; die Gegenrichtung bestimmt die Vorauswahl.
pub fn open_connection_edit(state: &mut AppState, from: u64, to: u64) -> bool {
    let Some(connection) = state.graph.find_connection(from, to).copied() else {
        log::warn!("Verbindung {} -> {} nicht gefunden", from, to);
        return false;
    };
    let bidirectional = state.graph.has_connection(to, from);
    state.modals.apply(ModalAction::OpenConnectionEdit {
        from,
        to,
        weight: connection.weight,
        bidirectional,
    });
    true
}

/// Speichert das Fulcrum-Formular samt Stockwerk-Zeilen.
///
/// `Ok(None)`: Validierung fehlgeschlagen, Fehler stehen im Modal.
pub fn submit_fulcrum_form(
    state: &mut AppState,
    backend: &mut dyn FloorPlanBackend,
    form: FulcrumForm,
) -> anyhow::Result<Option<FulcrumSaved>> {
    if !state.modals.fulcrum.visible {
        log::warn!("Fulcrum-Formular ohne offenes Modal ignoriert");
        return Ok(None);
    }
    state.modals.apply(ModalAction::SetFulcrumForm(form.clone()));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            log::warn!("Fulcrum-Formular ungültig: {}", errors);
            state.modals.apply(ModalAction::SetFulcrumErrors(errors));
            return Ok(None);
        }
    };
    state.modals.apply(ModalAction::SetFulcrumErrors(Default::default()));

    let saved = match (state.modals.fulcrum.mode, state.modals.fulcrum.fulcrum_id) {
        (ModalMode::Edit, Some(id)) => {
            graph::update_fulcrum(&mut state.graph, backend, id, &draft)
                .context("Fulcrum konnte nicht gespeichert werden")?;
            FulcrumSaved::Updated(id)
        }
        _ => {
            let created = graph::create_fulcrum(&mut state.graph, backend, &draft)
                .context("Fulcrum konnte nicht angelegt werden")?;
            // Erneutes Absenden nach einem Zeilenfehler darf nicht doppelt anlegen.
            state.modals.fulcrum.mode = ModalMode::Edit;
            state.modals.fulcrum.fulcrum_id = Some(created.id);
            FulcrumSaved::Created(created.id)
        }
    };

    let focal = match saved {
        FulcrumSaved::Created(id) | FulcrumSaved::Updated(id) => id,
    };
    interfloor::sync_rows(&mut state.graph, backend, focal, &form.interfloor)?;

    state.modals.apply(ModalAction::CloseFulcrum);
    Ok(Some(saved))
}

/// Löscht den Fulcrum des Bearbeiten-Modals.
pub fn delete_fulcrum(
    state: &mut AppState,
    backend: &mut dyn FloorPlanBackend,
) -> anyhow::Result<Option<u64>> {
    let modal = &state.modals.fulcrum;
    let (true, ModalMode::Edit, Some(id)) = (modal.visible, modal.mode, modal.fulcrum_id) else {
        return Ok(None);
    };
    graph::delete_fulcrum(&mut state.graph, backend, id)
        .context("Fulcrum konnte nicht gelöscht werden")?;
    state.modals.apply(ModalAction::CloseFulcrum);
    Ok(Some(id))
}

/// Speichert das Verbindungs-Formular.
///
/// Anlegen: Hinrichtung anlegen, bei beidseitig die Gegenrichtung ersetzen.
/// Bearbeiten: Hinrichtung neu anlegen, Gegenrichtung ersetzen oder entfernen.
pub fn submit_connection_form(
    state: &mut AppState,
    backend: &mut dyn FloorPlanBackend,
    form: ConnectionForm,
) -> anyhow::Result<Option<(u64, u64)>> {
    let modal = &state.modals.connection;
    let (true, Some((from, to))) = (modal.visible, modal.endpoints()) else {
        log::warn!("Verbindungs-Formular ohne offenes Modal ignoriert");
        return Ok(None);
    };
    let mode = modal.mode;
    state.modals.apply(ModalAction::SetConnectionForm(form.clone()));

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            log::warn!("Verbindungs-Formular ungültig: {}", errors);
            state.modals.apply(ModalAction::SetConnectionErrors(errors));
            return Ok(None);
        }
    };
    state
        .modals
        .apply(ModalAction::SetConnectionErrors(Default::default()));

    let reverse_exists = state.graph.has_connection(to, from);
    let forward_exists = mode == ModalMode::Edit || state.graph.has_connection(from, to);
    let g = &mut state.graph;

    graph::replace_connection(g, backend, from, ConnectionDraft::new(to, input.weight), forward_exists)
        .context("Verbindung konnte nicht gespeichert werden")?;
    if input.bidirectional {
        graph::replace_connection(
            g,
            backend,
            to,
            ConnectionDraft::new(from, input.weight),
            reverse_exists,
        )
        .context("Gegenrichtung konnte nicht gespeichert werden")?;
    } else if mode == ModalMode::Edit && reverse_exists {
        graph::remove_connection(g, backend, to, from)
            .context("Gegenrichtung konnte nicht entfernt werden")?;
    }

    state.modals.apply(ModalAction::CloseConnection);
    Ok(Some((from, to)))
}

/// Löscht die Verbindung des Bearbeiten-Modals.
pub fn delete_connection(
    state: &mut AppState,
    backend: &mut dyn FloorPlanBackend,
) -> anyhow::Result<Option<(u64, u64)>> {
    let modal = &state.modals.connection;
    let (true, ModalMode::Edit, Some((from, to))) = (modal.visible, modal.mode, modal.endpoints())
    else {
        return Ok(None);
    };
    graph::remove_connection(&mut state.graph, backend, from, to)
        .context("Verbindung konnte nicht gelöscht werden")?;
    state.modals.apply(ModalAction::CloseConnection);
    Ok(Some((from, to)))
}
