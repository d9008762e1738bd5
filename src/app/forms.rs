//! Formulardaten der Modals und deren lokale Validierung.
//!
//! Die Validierung läuft vor jedem Backend-Aufruf. Fehler sind feldbezogen
//! (`Feldname → Meldung`) und blockieren das Absenden.

use std::collections::BTreeMap;

use glam::DVec2;

use crate::core::connection::{INTERFLOOR_WEIGHT_MIN, WEIGHT_MAX, WEIGHT_MIN};
use crate::core::fulcrum::{DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use crate::core::{FacingDirection, Fulcrum, FulcrumDraft, FulcrumType, InterfloorRow};

/// Feldbezogene Validierungsfehler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Leere Fehlermenge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Fehler; der erste Fehler pro Feld bleibt stehen.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Meldung für `field`, falls vorhanden.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Alle Fehler in Feld-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&joined.join("; "))
    }
}

/// Roheingaben des Fulcrum-Formulars.
///
/// Typ und Blickrichtung kommen als Text aus dem Host und werden erst bei
/// der Validierung in die Enums übersetzt.
#[derive(Debug, Clone, PartialEq)]
pub struct FulcrumForm {
    pub name: String,
    pub description: String,
    pub kind: String,
    pub facing_direction: Option<String>,
    pub has_qr: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub floor_id: u64,
    /// Zeilen des Stockwerk-übergreifenden Panels
    pub interfloor: Vec<InterfloorRow>,
}

impl Default for FulcrumForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: FulcrumType::Room.as_str().to_string(),
            facing_direction: None,
            has_qr: false,
            x: None,
            y: None,
            floor_id: 0,
            interfloor: Vec::new(),
        }
    }
}

impl FulcrumForm {
    /// Leeres Formular für einen neuen Fulcrum an `position`.
    pub fn for_create(floor_id: u64, position: DVec2) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            floor_id,
            ..Self::default()
        }
    }

    /// Vorbelegtes Formular für einen bestehenden Fulcrum.
    pub fn for_edit(fulcrum: &Fulcrum) -> Self {
        Self {
            name: fulcrum.name.clone(),
            description: fulcrum.description.clone(),
            kind: fulcrum.kind.as_str().to_string(),
            facing_direction: fulcrum.facing_direction.map(|d| d.as_str().to_string()),
            has_qr: fulcrum.has_qr,
            x: Some(fulcrum.position.x),
            y: Some(fulcrum.position.y),
            floor_id: fulcrum.floor_id,
            interfloor: Vec::new(),
        }
    }

    /// Prüft alle Felder und liefert den Entwurf für das Backend.
    pub fn validate(&self) -> Result<FulcrumDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.add("name", format!("Name must be at most {NAME_MAX_LEN} characters"));
        }

        let description = self.description.trim();
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            errors.add(
                "description",
                format!("Description must be at most {DESCRIPTION_MAX_LEN} characters"),
            );
        }

        let kind = FulcrumType::parse(&self.kind);
        if kind.is_none() {
            errors.add("type", format!("Unknown fulcrum type '{}'", self.kind));
        }

        let facing_direction = match self.facing_direction.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match FacingDirection::parse(raw) {
                Some(direction) => Some(direction),
                None => {
                    errors.add("facingDirection", format!("Unknown facing direction '{raw}'"));
                    None
                }
            },
        };
        if self.has_qr && facing_direction.is_none() && !errors.contains("facingDirection") {
            errors.add("facingDirection", "Facing direction is required for QR markers");
        }

        let x = validate_coordinate(self.x, "x", &mut errors);
        let y = validate_coordinate(self.y, "y", &mut errors);

        for row in &self.interfloor {
            validate_interfloor_row(row, &mut errors);
        }

        let draft = FulcrumDraft {
            floor_id: self.floor_id,
            position: DVec2::new(x, y),
            name: name.to_string(),
            description: description.to_string(),
            kind: kind.unwrap_or_default(),
            facing_direction: if self.has_qr { facing_direction } else { None },
            has_qr: self.has_qr,
        };
        errors.into_result(draft)
    }
}

fn validate_coordinate(value: Option<f64>, field: &str, errors: &mut ValidationErrors) -> f64 {
    match value {
        Some(v) if v.is_finite() && (0.0..=1.0).contains(&v) => v,
        Some(_) => {
            errors.add(field, format!("{} must be between 0 and 1", field.to_uppercase()));
            0.0
        }
        None => {
            errors.add(field, format!("{} is required", field.to_uppercase()));
            0.0
        }
    }
}

fn validate_interfloor_row(row: &InterfloorRow, errors: &mut ValidationErrors) {
    let check = |enabled: bool, weight: f64, dir: &str, errors: &mut ValidationErrors| {
        if enabled && !(weight.is_finite() && weight >= INTERFLOOR_WEIGHT_MIN) {
            errors.add(
                format!("interfloor.{}.{dir}", row.fulcrum_id),
                format!("Weight must be at least {INTERFLOOR_WEIGHT_MIN}"),
            );
        }
    };
    check(row.forward_enabled, row.forward_weight, "forward", errors);
    check(row.backward_enabled, row.backward_weight, "backward", errors);
}

/// Roheingaben des Verbindungs-Formulars.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionForm {
    /// Gewicht als eingegebener Text
    pub weight: String,
    pub bidirectional: bool,
}

impl Default for ConnectionForm {
    fn default() -> Self {
        Self {
            weight: "1".to_string(),
            bidirectional: true,
        }
    }
}

/// Geprüfte Verbindungs-Eingabe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionInput {
    pub weight: f64,
    pub bidirectional: bool,
}

impl ConnectionForm {
    /// Formular mit Gewicht und Richtungswahl.
    pub fn new(weight: f64, bidirectional: bool) -> Self {
        Self {
            weight: format_weight(weight),
            bidirectional,
        }
    }

    /// Prüft das Gewicht gegen `[0.1, 100]`.
    pub fn validate(&self) -> Result<ConnectionInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let weight = match self.weight.trim().parse::<f64>() {
            Ok(w) if w.is_finite() && (WEIGHT_MIN..=WEIGHT_MAX).contains(&w) => w,
            Ok(_) => {
                errors.add(
                    "weight",
                    format!("Weight must be between {WEIGHT_MIN} and {WEIGHT_MAX}"),
                );
                0.0
            }
            Err(_) => {
                errors.add("weight", "Weight must be a number");
                0.0
            }
        };
        errors.into_result(ConnectionInput {
            weight,
            bidirectional: self.bidirectional,
        })
    }
}

fn format_weight(weight: f64) -> String {
    let text = format!("{weight:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
