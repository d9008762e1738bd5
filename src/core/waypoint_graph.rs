//! Lokales Wegpunkt-Modell eines Stockwerks.
//!
//! Hält nur aktive Fulcrums des Stockwerks und die von ihnen ausgehenden Kanten.
//! Kanten dürfen auf Fulcrums anderer Stockwerke zeigen. Mutationen mit
//! Backend-Abgleich laufen über `app::use_cases::graph`; dieses Modul kennt nur
//! den lokalen Zustand.

use glam::DVec2;
use indexmap::IndexMap;

use super::{group_connections, Connection, ConnectionGroup, Fulcrum, FulcrumRecord};

/// Fulcrum aus dem Backend samt eingebetteter ausgehender Kanten.
#[derive(Debug, Clone, PartialEq)]
pub struct FulcrumWithConnections {
    pub record: FulcrumRecord,
    /// `(connected_fulcrum_id, weight)`
    pub connections: Vec<(u64, f64)>,
}

/// Wegpunkt-Graph eines Stockwerks.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    floor_id: u64,
    fulcrums: IndexMap<u64, Fulcrum>,
    connections: IndexMap<(u64, u64), Connection>,
}

impl WaypointGraph {
    /// Erstellt einen leeren Graphen für ein Stockwerk.
    pub fn new(floor_id: u64) -> Self {
        Self {
            floor_id,
            fulcrums: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Baut den Graphen aus Backend-Records.
    ///
    /// Soft-gelöschte Records und deren Kanten werden verworfen, bevor die
    /// eingebetteten Kanten flach gelegt werden.
    pub fn from_records(floor_id: u64, records: Vec<FulcrumWithConnections>) -> Self {
        let mut graph = Self::new(floor_id);
        let mut pending = Vec::new();

        for FulcrumWithConnections {
            record,
            connections,
        } in records
        {
            let Some(fulcrum) = record.into_active() else {
                continue;
            };
            if fulcrum.floor_id != floor_id {
                log::warn!(
                    "Fulcrum {} gehört zu Stockwerk {}, nicht {}, ignoriert",
                    fulcrum.id,
                    fulcrum.floor_id,
                    floor_id
                );
                continue;
            }
            let from = fulcrum.id;
            pending.extend(
                connections
                    .into_iter()
                    .map(|(to, weight)| Connection::new(from, to, weight)),
            );
            graph.fulcrums.insert(from, fulcrum);
        }

        for connection in pending {
            graph.insert_connection(connection);
        }

        graph
    }

    /// Stockwerk-ID dieses Graphen.
    pub fn floor_id(&self) -> u64 {
        self.floor_id
    }

    /// Anzahl aktiver Fulcrums.
    pub fn fulcrum_count(&self) -> usize {
        self.fulcrums.len()
    }

    /// Anzahl gerichteter Kanten.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Liefert einen Fulcrum per ID.
    pub fn fulcrum(&self, id: u64) -> Option<&Fulcrum> {
        self.fulcrums.get(&id)
    }

    /// `true`, wenn der Fulcrum auf diesem Stockwerk existiert.
    pub fn contains(&self, id: u64) -> bool {
        self.fulcrums.contains_key(&id)
    }

    /// Alle Fulcrums in Einfüge-Reihenfolge.
    pub fn fulcrums(&self) -> impl Iterator<Item = &Fulcrum> + '_ {
        self.fulcrums.values()
    }

    /// Alle Kanten in Einfüge-Reihenfolge.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values()
    }

    /// Kanten als Liste (z. B. für die Gruppierung).
    pub fn connection_list(&self) -> Vec<Connection> {
        self.connections.values().copied().collect()
    }

    /// Kanten, deren beide Endpunkte auf diesem Stockwerk liegen.
    pub fn local_connections(&self) -> Vec<Connection> {
        self.connections
            .values()
            .filter(|c| self.contains(c.from) && self.contains(c.to))
            .copied()
            .collect()
    }

    /// Gruppiert die lokalen Kanten; wird bei jedem Aufruf neu berechnet.
    pub fn connection_groups(&self) -> Vec<ConnectionGroup> {
        group_connections(&self.local_connections())
    }

    /// Sucht die Kante `from → to`.
    pub fn find_connection(&self, from: u64, to: u64) -> Option<&Connection> {
        self.connections.get(&(from, to))
    }

    /// `true`, wenn `from → to` existiert.
    pub fn has_connection(&self, from: u64, to: u64) -> bool {
        self.connections.contains_key(&(from, to))
    }

    /// Ausgehende Kanten eines Fulcrums.
    pub fn outgoing(&self, id: u64) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.values().filter(move |c| c.from == id)
    }

    /// Fügt einen Fulcrum ein oder ersetzt ihn (gleiche ID).
    pub fn upsert_fulcrum(&mut self, fulcrum: Fulcrum) -> Option<Fulcrum> {
        self.fulcrums.insert(fulcrum.id, fulcrum)
    }

    /// Setzt nur die Position eines Fulcrums.
    pub fn set_position(&mut self, id: u64, position: DVec2) -> bool {
        match self.fulcrums.get_mut(&id) {
            Some(fulcrum) => {
                fulcrum.position = position;
                true
            }
            None => false,
        }
    }

    /// Entfernt einen Fulcrum inklusive aller Kanten, die ihn berühren.
    pub fn remove_fulcrum(&mut self, id: u64) -> Option<Fulcrum> {
        let removed = self.fulcrums.shift_remove(&id);
        if removed.is_some() {
            self.connections.retain(|_, c| !c.touches(id));
        }
        removed
    }

    /// Fügt eine Kante ein; bestehende Kanten mit gleichem Schlüssel werden ersetzt.
    ///
    /// Kanten, deren Start nicht auf diesem Stockwerk liegt, gehören nicht in
    /// diesen Graphen und werden ignoriert (`false`).
    pub fn insert_connection(&mut self, connection: Connection) -> bool {
        if !self.contains(connection.from) {
            return false;
        }
        self.connections.insert(connection.key(), connection);
        true
    }

    /// Entfernt die Kante `from → to`.
    pub fn remove_connection(&mut self, from: u64, to: u64) -> Option<Connection> {
        self.connections.shift_remove(&(from, to))
    }

    /// Normalisierte Positionen aller Fulcrums.
    pub fn positions(&self) -> impl Iterator<Item = (u64, DVec2)> + '_ {
        self.fulcrums.values().map(|f| (f.id, f.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FulcrumType;

    fn record(id: u64, floor: u64, deleted: bool, edges: &[(u64, f64)]) -> FulcrumWithConnections {
        FulcrumWithConnections {
            record: FulcrumRecord::new(
                Fulcrum::new(id, floor, DVec2::new(0.1 * id as f64, 0.5), format!("F{id}"), FulcrumType::Room),
                deleted,
            ),
            connections: edges.to_vec(),
        }
    }

    #[test]
    fn test_from_records_filters_deleted_before_flattening() {
        let graph = WaypointGraph::from_records(
            1,
            vec![
                record(1, 1, false, &[(2, 1.0), (3, 2.0)]),
                record(2, 1, false, &[(1, 1.5)]),
                record(3, 1, true, &[(1, 4.0)]),
            ],
        );

        assert_eq!(graph.fulcrum_count(), 2);
        assert!(!graph.contains(3));
        assert!(!graph.has_connection(3, 1));
        assert!(graph.has_connection(1, 3));
        assert_eq!(graph.connection_count(), 3);
    }

    #[test]
    fn test_groups_only_use_local_edges() {
        let graph = WaypointGraph::from_records(
            1,
            vec![
                record(1, 1, false, &[(2, 1.0), (99, 1.0)]),
                record(2, 1, false, &[(1, 2.0)]),
            ],
        );
        let groups = graph.connection_groups();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_bidirectional());
    }

    #[test]
    fn test_insert_connection_replaces_same_pair() {
        let mut graph = WaypointGraph::from_records(
            1,
            vec![record(1, 1, false, &[]), record(2, 1, false, &[])],
        );
        assert!(graph.insert_connection(Connection::new(1, 2, 1.0)));
        assert!(graph.insert_connection(Connection::new(1, 2, 7.0)));
        assert_eq!(graph.connection_count(), 1);
        assert_eq!(graph.find_connection(1, 2).map(|c| c.weight), Some(7.0));
    }

    #[test]
    fn test_insert_connection_from_foreign_floor_is_ignored() {
        let mut graph = WaypointGraph::from_records(1, vec![record(1, 1, false, &[])]);
        assert!(!graph.insert_connection(Connection::new(50, 1, 1.0)));
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_remove_fulcrum_cascades_edges() {
        let mut graph = WaypointGraph::from_records(
            1,
            vec![
                record(1, 1, false, &[(2, 1.0)]),
                record(2, 1, false, &[(1, 1.0), (3, 1.0)]),
                record(3, 1, false, &[(2, 1.0)]),
            ],
        );
        graph.remove_fulcrum(2);
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.fulcrum_count(), 2);
    }

    #[test]
    fn test_records_of_other_floor_are_skipped() {
        let graph = WaypointGraph::from_records(1, vec![record(5, 2, false, &[])]);
        assert_eq!(graph.fulcrum_count(), 0);
    }
}
