//! Gruppierung gerichteter Kanten zu ein- und beidseitigen Darstellungen.
//!
//! "Bidirektional" wird nie gespeichert, sondern bei jedem Szenenaufbau aus der
//! Kantenliste abgeleitet.

use super::Connection;

/// Darstellungseinheit für eine Kante oder ein Kantenpaar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionGroup {
    /// Nur `from → to` existiert.
    Unidirectional { from: u64, to: u64, weight: f64 },
    /// `a → b` und `b → a` existieren.
    Bidirectional {
        a: u64,
        b: u64,
        weight_ab: f64,
        weight_ba: f64,
    },
}

impl ConnectionGroup {
    /// `true` für Kantenpaare.
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, ConnectionGroup::Bidirectional { .. })
    }

    /// Endpunkte in Darstellungsreihenfolge.
    pub fn endpoints(&self) -> (u64, u64) {
        match *self {
            ConnectionGroup::Unidirectional { from, to, .. } => (from, to),
            ConnectionGroup::Bidirectional { a, b, .. } => (a, b),
        }
    }

    /// Gewicht der Richtung `from → to`, falls diese Gruppe sie enthält.
    pub fn weight(&self, from: u64, to: u64) -> Option<f64> {
        match *self {
            ConnectionGroup::Unidirectional {
                from: f,
                to: t,
                weight,
            } => (f == from && t == to).then_some(weight),
            ConnectionGroup::Bidirectional {
                a,
                b,
                weight_ab,
                weight_ba,
            } => {
                if a == from && b == to {
                    Some(weight_ab)
                } else if b == from && a == to {
                    Some(weight_ba)
                } else {
                    None
                }
            }
        }
    }
}

/// Gruppiert Kanten: jede Kante mit vorhandener Gegenrichtung landet zusammen
/// mit dieser in genau einer bidirektionalen Gruppe.
///
/// Lineare Rückwärtssuche, O(n²).
pub fn group_connections(connections: &[Connection]) -> Vec<ConnectionGroup> {
    let mut processed = vec![false; connections.len()];
    let mut groups = Vec::with_capacity(connections.len());

    for (i, connection) in connections.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let reverse = connections.iter().enumerate().position(|(j, other)| {
            j != i && !processed[j] && other.from == connection.to && other.to == connection.from
        });

        match reverse {
            Some(j) => {
                processed[j] = true;
                groups.push(ConnectionGroup::Bidirectional {
                    a: connection.from,
                    b: connection.to,
                    weight_ab: connection.weight,
                    weight_ba: connections[j].weight,
                });
            }
            None => groups.push(ConnectionGroup::Unidirectional {
                from: connection.from,
                to: connection.to,
                weight: connection.weight,
            }),
        }
    }

    groups
}
