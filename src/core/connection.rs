//! Gerichtete, gewichtete Verbindung zwischen zwei Fulcrums.

use serde::{Deserialize, Serialize};

/// Kleinstes erlaubtes Gewicht.
pub const WEIGHT_MIN: f64 = 0.1;
/// Größtes im Formular erlaubtes Gewicht.
pub const WEIGHT_MAX: f64 = 100.0;
/// Untergrenze für Stockwerk-übergreifende Gewichte.
pub const INTERFLOOR_WEIGHT_MIN: f64 = 1.0;
/// Gewicht neuer Verbindungen.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Gerichtete Kante `from → to`. Die Gegenrichtung ist ein eigener Datensatz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: u64,
    pub to: u64,
    pub weight: f64,
}

impl Connection {
    /// Erstellt eine neue Kante.
    pub fn new(from: u64, to: u64, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// Schlüssel der Kante im Graphen.
    pub fn key(&self) -> (u64, u64) {
        (self.from, self.to)
    }

    /// Schlüssel der Gegenrichtung.
    pub fn reverse_key(&self) -> (u64, u64) {
        (self.to, self.from)
    }

    /// `true`, wenn die Kante `id` als Start- oder Endpunkt nutzt.
    pub fn touches(&self, id: u64) -> bool {
        self.from == id || self.to == id
    }
}

/// Payload zum Anlegen einer Kante ab einem bekannten Start-Fulcrum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDraft {
    pub connected_fulcrum_id: u64,
    pub weight: f64,
}

impl ConnectionDraft {
    /// Erstellt einen Draft zu `to` mit Gewicht `weight`.
    pub fn new(to: u64, weight: f64) -> Self {
        Self {
            connected_fulcrum_id: to,
            weight,
        }
    }
}

/// Normalisiert ein Stockwerk-übergreifendes Gewicht: ungültig oder `< 1` → `1`.
pub fn normalize_interfloor_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight >= INTERFLOOR_WEIGHT_MIN {
        weight
    } else {
        INTERFLOOR_WEIGHT_MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interfloor_weight_normalization() {
        assert_eq!(normalize_interfloor_weight(2.5), 2.5);
        assert_eq!(normalize_interfloor_weight(0.3), 1.0);
        assert_eq!(normalize_interfloor_weight(f64::NAN), 1.0);
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let json = serde_json::to_value(ConnectionDraft::new(5, 2.0)).expect("serialisierbar");
        assert_eq!(json["connectedFulcrumId"], 5);
        assert_eq!(json["weight"], 2.0);
    }
}
