//! Stockwerk-übergreifende Verbindungen eines fokussierten Fulcrums.
//!
//! Das Panel listet jeden aktiven Nicht-Korridor-Fulcrum anderer Stockwerke
//! desselben Bereichs mit Hin- und Rückrichtung.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::connection::DEFAULT_WEIGHT;
use super::floor::display_floor_name;
use super::{Connection, Floor, Fulcrum, FulcrumWithConnections};

/// Alle Stockwerke und Fulcrums eines Mapping-Bereichs.
#[derive(Debug, Clone, Default)]
pub struct AreaGraph {
    pub area_id: u64,
    /// Nur aktive Fulcrums
    pub fulcrums: Vec<Fulcrum>,
    /// Alle Kanten zwischen aktiven Fulcrums
    pub connections: Vec<Connection>,
    pub floor_names: HashMap<u64, String>,
}

impl AreaGraph {
    /// Baut den Bereichsgraphen; soft-gelöschte Records werden zuerst entfernt.
    pub fn from_records(
        area_id: u64,
        floors: &[Floor],
        records: Vec<FulcrumWithConnections>,
    ) -> Self {
        let floor_names = floors
            .iter()
            .map(|floor| (floor.id, floor.display_name()))
            .collect();

        let mut fulcrums = Vec::new();
        let mut connections = Vec::new();
        for entry in records {
            let Some(fulcrum) = entry.record.into_active() else {
                continue;
            };
            connections.extend(
                entry
                    .connections
                    .into_iter()
                    .map(|(to, weight)| Connection::new(fulcrum.id, to, weight)),
            );
            fulcrums.push(fulcrum);
        }

        let active: HashSet<u64> = fulcrums.iter().map(|f| f.id).collect();
        connections.retain(|c| active.contains(&c.to));

        Self {
            area_id,
            fulcrums,
            connections,
            floor_names,
        }
    }

    /// Anzeigename eines Stockwerks (Fallback `Floor {id}`).
    pub fn floor_name(&self, floor_id: u64) -> String {
        display_floor_name(floor_id, self.floor_names.get(&floor_id).map(String::as_str))
    }

    /// Gewicht der Kante `from → to`, falls vorhanden.
    pub fn weight(&self, from: u64, to: u64) -> Option<f64> {
        self.connections
            .iter()
            .find(|c| c.from == from && c.to == to)
            .map(|c| c.weight)
    }
}

/// Eine Zeile des Stockwerk-übergreifenden Panels.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfloorRow {
    pub fulcrum_id: u64,
    pub name: String,
    pub floor_id: u64,
    pub floor_name: String,
    /// Fokus → Zeile
    pub forward_enabled: bool,
    pub forward_weight: f64,
    /// Zeile → Fokus
    pub backward_enabled: bool,
    pub backward_weight: f64,
    /// Kantenstand beim Laden, um deaktivierte Richtungen zu entfernen
    pub forward_existing: bool,
    pub backward_existing: bool,
}

impl InterfloorRow {
    /// `true`, wenn das Speichern für diese Zeile Backend-Aufrufe auslösen kann.
    pub fn needs_sync(&self) -> bool {
        self.forward_enabled
            || self.backward_enabled
            || self.forward_existing
            || self.backward_existing
    }
}

/// Erzeugt die Panel-Zeilen für `focal` (oder `None` beim Anlegen eines neuen Fulcrums).
///
/// Sortierung: Stockwerksname, dann Fulcrum-Name.
pub fn build_interfloor_rows(
    focal: Option<u64>,
    focal_floor_id: u64,
    area: &AreaGraph,
) -> Vec<InterfloorRow> {
    let mut rows: Vec<InterfloorRow> = area
        .fulcrums
        .iter()
        .filter(|f| f.floor_id != focal_floor_id && f.kind.is_interfloor_candidate())
        .filter(|f| Some(f.id) != focal)
        .map(|f| {
            let forward = focal.and_then(|id| area.weight(id, f.id));
            let backward = focal.and_then(|id| area.weight(f.id, id));
            InterfloorRow {
                fulcrum_id: f.id,
                name: f.name.clone(),
                floor_id: f.floor_id,
                floor_name: area.floor_name(f.floor_id),
                forward_enabled: forward.is_some(),
                forward_weight: forward.unwrap_or(DEFAULT_WEIGHT),
                backward_enabled: backward.is_some(),
                backward_weight: backward.unwrap_or(DEFAULT_WEIGHT),
                forward_existing: forward.is_some(),
                backward_existing: backward.is_some(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        compare_names(&a.floor_name, &b.floor_name).then_with(|| compare_names(&a.name, &b.name))
    });
    rows
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FulcrumRecord, FulcrumType};
    use glam::DVec2;

    fn entry(
        id: u64,
        floor: u64,
        name: &str,
        kind: FulcrumType,
        edges: &[(u64, f64)],
    ) -> FulcrumWithConnections {
        FulcrumWithConnections {
            record: FulcrumRecord::Active(Fulcrum::new(id, floor, DVec2::splat(0.5), name, kind)),
            connections: edges.to_vec(),
        }
    }

    fn floors() -> Vec<Floor> {
        vec![
            Floor {
                id: 1,
                name: "Ground".into(),
                ..Default::default()
            },
            Floor {
                id: 2,
                name: "Basement".into(),
                ..Default::default()
            },
            Floor {
                id: 3,
                name: String::new(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_rows_skip_same_floor_and_corridors() {
        let area = AreaGraph::from_records(
            9,
            &floors(),
            vec![
                entry(1, 1, "Stairs G", FulcrumType::Stairs, &[(2, 2.5)]),
                entry(4, 1, "Room G", FulcrumType::Room, &[]),
                entry(2, 2, "Stairs B", FulcrumType::Stairs, &[]),
                entry(5, 2, "Corridor B", FulcrumType::Corridor, &[]),
                entry(6, 3, "Lift", FulcrumType::Elevator, &[(1, 3.0)]),
            ],
        );

        let rows = build_interfloor_rows(Some(1), 1, &area);
        let ids: Vec<u64> = rows.iter().map(|r| r.fulcrum_id).collect();
        assert_eq!(ids, vec![2, 6]);

        assert!(rows[0].forward_enabled);
        assert_eq!(rows[0].forward_weight, 2.5);
        assert!(!rows[0].backward_enabled);
        assert_eq!(rows[0].backward_weight, 1.0);

        assert_eq!(rows[1].floor_name, "Floor 3");
        assert!(rows[1].backward_enabled);
        assert_eq!(rows[1].backward_weight, 3.0);
    }

    #[test]
    fn test_rows_without_focal_have_no_edges() {
        let area = AreaGraph::from_records(
            9,
            &floors(),
            vec![entry(2, 2, "Stairs B", FulcrumType::Stairs, &[(1, 1.0)])],
        );
        let rows = build_interfloor_rows(None, 1, &area);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].forward_enabled && !rows[0].backward_enabled);
        assert!(!rows[0].needs_sync());
    }

    #[test]
    fn test_deleted_records_and_dangling_edges_are_dropped() {
        let mut records = vec![entry(1, 1, "A", FulcrumType::Room, &[(2, 1.0)])];
        records.push(FulcrumWithConnections {
            record: FulcrumRecord::Deleted(Fulcrum::new(2, 2, DVec2::ZERO, "B", FulcrumType::Room)),
            connections: vec![(1, 1.0)],
        });
        let area = AreaGraph::from_records(9, &floors(), records);
        assert_eq!(area.fulcrums.len(), 1);
        assert!(area.connections.is_empty());
    }
}
