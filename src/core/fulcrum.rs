//! Fulcrum: benannter Wegpunkt auf genau einem Stockwerk.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::coords::clamp01_vec;

/// Maximale Länge des Namens (Zeichen).
pub const NAME_MAX_LEN: usize = 50;
/// Maximale Länge der Beschreibung (Zeichen).
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// Art eines Wegpunkts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulcrumType {
    #[default]
    Room,
    Corridor,
    Stairs,
    Elevator,
    Entrance,
    Hall,
    Restroom,
    Kitchen,
    Reception,
    EmergencyExit,
    Landmark,
}

impl FulcrumType {
    /// Alle Varianten in Anzeige-Reihenfolge.
    pub const ALL: [FulcrumType; 11] = [
        FulcrumType::Room,
        FulcrumType::Corridor,
        FulcrumType::Stairs,
        FulcrumType::Elevator,
        FulcrumType::Entrance,
        FulcrumType::Hall,
        FulcrumType::Restroom,
        FulcrumType::Kitchen,
        FulcrumType::Reception,
        FulcrumType::EmergencyExit,
        FulcrumType::Landmark,
    ];

    /// Wire-Name (`ROOM`, `EMERGENCY_EXIT`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            FulcrumType::Room => "ROOM",
            FulcrumType::Corridor => "CORRIDOR",
            FulcrumType::Stairs => "STAIRS",
            FulcrumType::Elevator => "ELEVATOR",
            FulcrumType::Entrance => "ENTRANCE",
            FulcrumType::Hall => "HALL",
            FulcrumType::Restroom => "RESTROOM",
            FulcrumType::Kitchen => "KITCHEN",
            FulcrumType::Reception => "RECEPTION",
            FulcrumType::EmergencyExit => "EMERGENCY_EXIT",
            FulcrumType::Landmark => "LANDMARK",
        }
    }

    /// Parst einen Wire-Namen; unbekannte Werte liefern `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Darf im Stockwerk-übergreifenden Panel auftauchen (alles außer Korridore).
    pub fn is_interfloor_candidate(self) -> bool {
        self != FulcrumType::Corridor
    }
}

/// Blickrichtung eines scanbaren Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacingDirection {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl FacingDirection {
    /// Alle Richtungen.
    pub const ALL: [FacingDirection; 4] = [
        FacingDirection::Up,
        FacingDirection::Right,
        FacingDirection::Down,
        FacingDirection::Left,
    ];

    /// Wire-Name.
    pub fn as_str(self) -> &'static str {
        match self {
            FacingDirection::Up => "UP",
            FacingDirection::Right => "RIGHT",
            FacingDirection::Down => "DOWN",
            FacingDirection::Left => "LEFT",
        }
    }

    /// Parst einen Wire-Namen.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Ein aktiver Wegpunkt, wie ihn das Graph-Modell hält.
#[derive(Debug, Clone, PartialEq)]
pub struct Fulcrum {
    /// Server-vergebene ID
    pub id: u64,
    /// Stockwerk, fix für die Lebensdauer
    pub floor_id: u64,
    /// Normalisierte Position in `[0, 1]²`
    pub position: DVec2,
    pub name: String,
    pub description: String,
    pub kind: FulcrumType,
    /// Nur mit scanbarem Marker relevant
    pub facing_direction: Option<FacingDirection>,
    pub has_qr: bool,
}

impl Fulcrum {
    /// Erstellt einen Fulcrum ohne Beschreibung und Marker; die Position wird geklemmt.
    pub fn new(
        id: u64,
        floor_id: u64,
        position: DVec2,
        name: impl Into<String>,
        kind: FulcrumType,
    ) -> Self {
        Self {
            id,
            floor_id,
            position: clamp01_vec(position),
            name: name.into(),
            description: String::new(),
            kind,
            facing_direction: None,
            has_qr: false,
        }
    }
}

/// Eingabedaten für Anlegen und Aktualisieren eines Fulcrums.
#[derive(Debug, Clone, PartialEq)]
pub struct FulcrumDraft {
    pub floor_id: u64,
    pub position: DVec2,
    pub name: String,
    pub description: String,
    pub kind: FulcrumType,
    pub facing_direction: Option<FacingDirection>,
    pub has_qr: bool,
}

impl FulcrumDraft {
    /// Übernimmt alle editierbaren Felder eines bestehenden Fulcrums.
    pub fn from_fulcrum(fulcrum: &Fulcrum) -> Self {
        Self {
            floor_id: fulcrum.floor_id,
            position: fulcrum.position,
            name: fulcrum.name.clone(),
            description: fulcrum.description.clone(),
            kind: fulcrum.kind,
            facing_direction: fulcrum.facing_direction,
            has_qr: fulcrum.has_qr,
        }
    }

    /// Materialisiert den Entwurf mit einer vergebenen ID.
    pub fn into_fulcrum(self, id: u64) -> Fulcrum {
        Fulcrum {
            id,
            floor_id: self.floor_id,
            position: clamp01_vec(self.position),
            name: self.name,
            description: self.description,
            kind: self.kind,
            facing_direction: if self.has_qr {
                self.facing_direction
            } else {
                None
            },
            has_qr: self.has_qr,
        }
    }
}

/// Fulcrum an der Backend-Grenze: aktiv oder soft-gelöscht.
#[derive(Debug, Clone, PartialEq)]
pub enum FulcrumRecord {
    Active(Fulcrum),
    Deleted(Fulcrum),
}

impl FulcrumRecord {
    /// Erstellt den passenden Record anhand des Lösch-Flags.
    pub fn new(fulcrum: Fulcrum, deleted: bool) -> Self {
        if deleted {
            FulcrumRecord::Deleted(fulcrum)
        } else {
            FulcrumRecord::Active(fulcrum)
        }
    }

    /// Der Fulcrum, unabhängig vom Status.
    pub fn fulcrum(&self) -> &Fulcrum {
        match self {
            FulcrumRecord::Active(f) | FulcrumRecord::Deleted(f) => f,
        }
    }

    /// `true` für soft-gelöschte Records.
    pub fn is_deleted(&self) -> bool {
        matches!(self, FulcrumRecord::Deleted(_))
    }

    /// Liefert den Fulcrum nur, wenn er aktiv ist.
    pub fn into_active(self) -> Option<Fulcrum> {
        match self {
            FulcrumRecord::Active(f) => Some(f),
            FulcrumRecord::Deleted(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parse_accepts_wire_names_only() {
        assert_eq!(FulcrumType::parse("ROOM"), Some(FulcrumType::Room));
        assert_eq!(
            FulcrumType::parse("emergency_exit"),
            Some(FulcrumType::EmergencyExit)
        );
        assert_eq!(FulcrumType::parse("BALCONY"), None);
        assert_eq!(FacingDirection::parse("left"), Some(FacingDirection::Left));
        assert_eq!(FacingDirection::parse("north"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FulcrumType::EmergencyExit).expect("serialisierbar");
        assert_eq!(json, "\"EMERGENCY_EXIT\"");
        let dir: FacingDirection = serde_json::from_str("\"DOWN\"").expect("deserialisierbar");
        assert_eq!(dir, FacingDirection::Down);
    }

    #[test]
    fn test_corridor_is_no_interfloor_candidate() {
        assert!(!FulcrumType::Corridor.is_interfloor_candidate());
        assert!(FulcrumType::Stairs.is_interfloor_candidate());
    }

    #[test]
    fn test_new_clamps_position() {
        let f = Fulcrum::new(1, 2, DVec2::new(-0.5, 1.5), "A", FulcrumType::Room);
        assert_eq!(f.position, DVec2::new(0.0, 1.0));
    }

    #[test]
    fn test_draft_drops_facing_without_qr() {
        let draft = FulcrumDraft {
            floor_id: 3,
            position: DVec2::new(0.2, 0.3),
            name: "Kiosk".into(),
            description: String::new(),
            kind: FulcrumType::Landmark,
            facing_direction: Some(FacingDirection::Left),
            has_qr: false,
        };
        let f = draft.into_fulcrum(9);
        assert_eq!(f.id, 9);
        assert_eq!(f.facing_direction, None);
    }

    #[test]
    fn test_record_filters_deleted() {
        let f = Fulcrum::new(1, 1, DVec2::ZERO, "A", FulcrumType::Room);
        assert!(FulcrumRecord::new(f.clone(), true).into_active().is_none());
        assert_eq!(FulcrumRecord::new(f.clone(), false).into_active(), Some(f));
    }
}
