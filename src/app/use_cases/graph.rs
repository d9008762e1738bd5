//! Mutationen des Wegpunkt-Graphen über das Backend.
//!
//! Jede Operation wartet zuerst auf das Backend und ändert den lokalen Graphen
//! erst danach. Schlägt der Aufruf fehl, bleibt der Graph unverändert.

use crate::backend::{BackendError, FloorPlanBackend};
use crate::core::{Connection, ConnectionDraft, Fulcrum, FulcrumDraft, WaypointGraph};

/// Fehler bei Graph-Mutationen.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Fulcrum {0} ist auf diesem Stockwerk nicht vorhanden")]
    UnknownFulcrum(u64),
    #[error("Fulcrum {id} kann nicht auf ein anderes Stockwerk verschoben werden")]
    FloorChange { id: u64 },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Legt einen Fulcrum an und übernimmt ihn, sofern er zum geladenen Stockwerk gehört.
pub fn create_fulcrum(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    draft: &FulcrumDraft,
) -> Result<Fulcrum, GraphError> {
    let created = backend.create_fulcrum(draft)?;
    if created.floor_id == graph.floor_id() {
        graph.upsert_fulcrum(created.clone());
    }
    log::info!("Fulcrum {} '{}' angelegt", created.id, created.name);
    Ok(created)
}

/// Aktualisiert einen Fulcrum des geladenen Stockwerks.
pub fn update_fulcrum(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    id: u64,
    draft: &FulcrumDraft,
) -> Result<Fulcrum, GraphError> {
    let existing = graph.fulcrum(id).ok_or(GraphError::UnknownFulcrum(id))?;
    if existing.floor_id != draft.floor_id {
        return Err(GraphError::FloorChange { id });
    }
    let updated = backend.update_fulcrum(id, draft)?;
    graph.upsert_fulcrum(updated.clone());
    log::info!("Fulcrum {} aktualisiert", id);
    Ok(updated)
}

/// Löscht einen Fulcrum (serverseitig soft) samt aller berührenden Kanten lokal.
pub fn delete_fulcrum(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    id: u64,
) -> Result<(), GraphError> {
    if !graph.contains(id) {
        return Err(GraphError::UnknownFulcrum(id));
    }
    backend.delete_fulcrum(id)?;
    graph.remove_fulcrum(id);
    log::info!("Fulcrum {} gelöscht", id);
    Ok(())
}

/// Legt `from → draft.connected_fulcrum_id` an; eine bestehende Kante wird ersetzt.
pub fn add_connection(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    from: u64,
    draft: ConnectionDraft,
) -> Result<(), BackendError> {
    let known = graph.has_connection(from, draft.connected_fulcrum_id);
    replace_connection(graph, backend, from, draft, known)
}

/// Wie [`add_connection`], aber mit externem Wissen über eine bestehende Kante
/// (z. B. für Kanten, die auf einem anderen Stockwerk beginnen).
pub fn replace_connection(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    from: u64,
    draft: ConnectionDraft,
    existing: bool,
) -> Result<(), BackendError> {
    let to = draft.connected_fulcrum_id;
    if existing {
        remove_connection(graph, backend, from, to)?;
    }
    match backend.add_connection(from, &draft) {
        Ok(()) => {}
        Err(BackendError::ConnectionAlreadyExists { .. }) => {
            log::warn!("Verbindung {} -> {} existierte bereits, wird ersetzt", from, to);
            remove_connection(graph, backend, from, to)?;
            backend.add_connection(from, &draft)?;
        }
        Err(e) => return Err(e),
    }
    graph.insert_connection(Connection::new(from, to, draft.weight));
    log::info!("Verbindung {} -> {} gespeichert (Gewicht {})", from, to, draft.weight);
    Ok(())
}

/// Entfernt `from → to`; fehlt die Kante im Backend, ist das kein Fehler.
pub fn remove_connection(
    graph: &mut WaypointGraph,
    backend: &mut dyn FloorPlanBackend,
    from: u64,
    to: u64,
) -> Result<(), BackendError> {
    backend.remove_connection(from, to)?;
    graph.remove_connection(from, to);
    log::debug!("Verbindung {} -> {} entfernt", from, to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendOperation, InMemoryBackend};
    use crate::core::{Floor, FulcrumType};
    use glam::DVec2;

    fn setup() -> (WaypointGraph, InMemoryBackend) {
        let backend = InMemoryBackend::new();
        backend.insert_floor(Floor {
            id: 1,
            mapping_area_id: 10,
            name: "Ground".into(),
            ..Default::default()
        });
        backend.insert_fulcrum(Fulcrum::new(1, 1, DVec2::new(0.1, 0.1), "A", FulcrumType::Room));
        backend.insert_fulcrum(Fulcrum::new(2, 1, DVec2::new(0.9, 0.1), "B", FulcrumType::Room));

        let mut graph = WaypointGraph::new(1);
        graph.upsert_fulcrum(Fulcrum::new(1, 1, DVec2::new(0.1, 0.1), "A", FulcrumType::Room));
        graph.upsert_fulcrum(Fulcrum::new(2, 1, DVec2::new(0.9, 0.1), "B", FulcrumType::Room));
        (graph, backend)
    }

    #[test]
    fn test_add_connection_twice_replaces() {
        let (mut graph, mut backend) = setup();
        add_connection(&mut graph, &mut backend, 1, ConnectionDraft::new(2, 3.0))
            .expect("Erste Verbindung sollte gelingen");
        add_connection(&mut graph, &mut backend, 1, ConnectionDraft::new(2, 7.0))
            .expect("Ersetzen sollte gelingen");

        assert_eq!(graph.connection_count(), 1);
        assert_eq!(graph.find_connection(1, 2).map(|c| c.weight), Some(7.0));
        assert_eq!(backend.connection(1, 2), Some(7.0));
    }

    #[test]
    fn test_backend_duplicate_unknown_locally_is_replaced() {
        let (mut graph, mut backend) = setup();
        backend.insert_connection(1, 2, 4.0);

        add_connection(&mut graph, &mut backend, 1, ConnectionDraft::new(2, 2.0))
            .expect("Ersetzen sollte gelingen");

        assert_eq!(backend.connection(1, 2), Some(2.0));
        assert_eq!(graph.find_connection(1, 2).map(|c| c.weight), Some(2.0));
    }

    #[test]
    fn test_failed_backend_leaves_graph_unchanged() {
        let (mut graph, mut backend) = setup();
        backend.fail_next(BackendOperation::AddConnection, 1);

        let result = add_connection(&mut graph, &mut backend, 1, ConnectionDraft::new(2, 1.0));

        assert!(result.is_err());
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_delete_fulcrum_removes_touching_edges() {
        let (mut graph, mut backend) = setup();
        add_connection(&mut graph, &mut backend, 1, ConnectionDraft::new(2, 1.0))
            .expect("Verbindung sollte gelingen");
        add_connection(&mut graph, &mut backend, 2, ConnectionDraft::new(1, 1.0))
            .expect("Verbindung sollte gelingen");

        delete_fulcrum(&mut graph, &mut backend, 2).expect("Löschen sollte gelingen");

        assert!(!graph.contains(2));
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(backend.stored_fulcrum(2).map(|(_, deleted)| deleted), Some(true));
    }

    #[test]
    fn test_update_rejects_floor_change() {
        let (mut graph, mut backend) = setup();
        let mut draft = FulcrumDraft::from_fulcrum(graph.fulcrum(1).expect("Fulcrum 1 fehlt"));
        draft.floor_id = 2;

        let result = update_fulcrum(&mut graph, &mut backend, 1, &draft);

        assert!(matches!(result, Err(GraphError::FloorChange { id: 1 })));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_create_adds_fulcrum_of_current_floor() {
        let (mut graph, mut backend) = setup();
        let draft = FulcrumDraft {
            floor_id: 1,
            position: DVec2::new(0.4, 0.6),
            name: "Lobby".into(),
            description: String::new(),
            kind: FulcrumType::Room,
            facing_direction: None,
            has_qr: false,
        };

        let created = create_fulcrum(&mut graph, &mut backend, &draft).expect("Anlegen sollte gelingen");

        assert_eq!(graph.fulcrum(created.id).map(|f| f.position), Some(DVec2::new(0.4, 0.6)));
    }
}
