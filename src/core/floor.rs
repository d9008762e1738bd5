//! Stockwerk-Metadaten und Grundriss-Plan.

/// Ein Stockwerk innerhalb eines Mapping-Bereichs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Floor {
    pub id: u64,
    pub mapping_area_id: u64,
    pub name: String,
    pub level: i32,
    pub description: String,
    /// SVG-Dokument des Grundrisses (leer, wenn noch kein Plan hochgeladen wurde)
    pub svg_plan: String,
}

impl Floor {
    /// Anzeigename; leere Namen fallen auf `Floor {id}` zurück.
    pub fn display_name(&self) -> String {
        display_floor_name(self.id, Some(&self.name))
    }

    /// `true`, wenn ein Grundriss hinterlegt ist.
    pub fn has_plan(&self) -> bool {
        !self.svg_plan.trim().is_empty()
    }
}

/// Änderbare Felder eines Stockwerks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloorUpdate {
    pub name: String,
    pub level: i32,
    pub description: String,
    pub svg_plan: String,
}

impl FloorUpdate {
    /// Übernimmt die Metadaten eines Stockwerks mit einem neuen Plan.
    pub fn with_plan(floor: &Floor, svg_plan: String) -> Self {
        Self {
            name: floor.name.clone(),
            level: floor.level,
            description: floor.description.clone(),
            svg_plan,
        }
    }
}

/// Anzeigename eines Stockwerks mit Fallback `Floor {id}`.
pub fn display_floor_name(id: u64, name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Floor {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(display_floor_name(7, None), "Floor 7");
        assert_eq!(display_floor_name(7, Some("  ")), "Floor 7");
        assert_eq!(display_floor_name(7, Some("Ground")), "Ground");
    }
}
