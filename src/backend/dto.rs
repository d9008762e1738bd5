//! Wire-Records der REST-API (JSON, camelCase).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::{
    FacingDirection, Floor, FloorUpdate, Fulcrum, FulcrumDraft, FulcrumRecord, FulcrumType,
    FulcrumWithConnections,
};

/// Stockwerk, wie es die API liefert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorDto {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub svg_plan: Option<String>,
    #[serde(default)]
    pub mapping_area_id: Option<u64>,
    #[serde(default)]
    pub deleted: bool,
}

impl From<FloorDto> for Floor {
    fn from(dto: FloorDto) -> Self {
        Floor {
            id: dto.id,
            mapping_area_id: dto.mapping_area_id.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            level: dto.level.unwrap_or_default(),
            description: dto.description.unwrap_or_default(),
            svg_plan: dto.svg_plan.unwrap_or_default(),
        }
    }
}

/// Änderbare Stockwerksfelder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorUpdateDto {
    pub name: String,
    pub level: i32,
    pub description: String,
    pub svg_plan: String,
}

impl From<&FloorUpdate> for FloorUpdateDto {
    fn from(update: &FloorUpdate) -> Self {
        Self {
            name: update.name.clone(),
            level: update.level,
            description: update.description.clone(),
            svg_plan: update.svg_plan.clone(),
        }
    }
}

/// Eingebettete ausgehende Verbindung.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FulcrumConnectionDto {
    pub connected_fulcrum_id: u64,
    pub weight: f64,
}

/// Fulcrum-Record der API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FulcrumDto {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default)]
    pub kind: FulcrumType,
    #[serde(default)]
    pub facing_direction: Option<FacingDirection>,
    #[serde(default)]
    pub has_qr: Option<bool>,
    #[serde(default)]
    pub qr_code_id: Option<String>,
    #[serde(default)]
    pub mapping_area_id: Option<u64>,
    pub floor_id: u64,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub connections: Vec<FulcrumConnectionDto>,
}

impl FulcrumDto {
    fn to_fulcrum(&self) -> Fulcrum {
        let has_qr = self.has_qr.unwrap_or(self.qr_code_id.is_some());
        Fulcrum {
            id: self.id,
            floor_id: self.floor_id,
            position: crate::core::coords::clamp01_vec(DVec2::new(self.x, self.y)),
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            kind: self.kind,
            facing_direction: if has_qr { self.facing_direction } else { None },
            has_qr,
        }
    }
}

impl From<FulcrumDto> for Fulcrum {
    fn from(dto: FulcrumDto) -> Self {
        dto.to_fulcrum()
    }
}

impl From<FulcrumDto> for FulcrumWithConnections {
    fn from(dto: FulcrumDto) -> Self {
        let fulcrum = dto.to_fulcrum();
        FulcrumWithConnections {
            record: FulcrumRecord::new(fulcrum, dto.deleted),
            connections: dto
                .connections
                .iter()
                .map(|c| (c.connected_fulcrum_id, c.weight))
                .collect(),
        }
    }
}

/// Payload für Anlegen/Aktualisieren.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FulcrumSaveDto {
    pub name: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: FulcrumType,
    pub facing_direction: Option<FacingDirection>,
    pub has_qr: bool,
    pub floor_id: u64,
}

impl From<&FulcrumDraft> for FulcrumSaveDto {
    fn from(draft: &FulcrumDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            x: draft.position.x,
            y: draft.position.y,
            kind: draft.kind,
            facing_direction: if draft.has_qr {
                draft.facing_direction
            } else {
                None
            },
            has_qr: draft.has_qr,
            floor_id: draft.floor_id,
        }
    }
}

/// Fehlerkörper der API.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiErrorDto {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulcrum_dto_decodes_embedded_connections() {
        let json = r#"{
            "id": 12, "name": "Lobby", "description": null, "x": 0.4, "y": 0.6,
            "type": "ROOM", "facingDirection": null, "qrCodeId": null,
            "mappingAreaId": 1, "floorId": 3, "deleted": false,
            "connections": [{"connectedFulcrumId": 13, "weight": 2.5}]
        }"#;
        let dto: FulcrumDto = serde_json::from_str(json).expect("JSON sollte lesbar sein");
        let entry = FulcrumWithConnections::from(dto);
        assert!(!entry.record.is_deleted());
        assert_eq!(entry.record.fulcrum().name, "Lobby");
        assert_eq!(entry.connections, vec![(13, 2.5)]);
    }

    #[test]
    fn test_qr_code_id_implies_has_qr() {
        let json = r#"{"id": 1, "x": 0.0, "y": 0.0, "type": "ENTRANCE", "facingDirection": "LEFT",
                       "qrCodeId": "abc", "floorId": 2, "deleted": true}"#;
        let dto: FulcrumDto = serde_json::from_str(json).expect("JSON sollte lesbar sein");
        let entry = FulcrumWithConnections::from(dto);
        assert!(entry.record.is_deleted());
        assert!(entry.record.fulcrum().has_qr);
        assert_eq!(
            entry.record.fulcrum().facing_direction,
            Some(FacingDirection::Left)
        );
    }

    #[test]
    fn test_save_dto_uses_wire_names() {
        let draft = FulcrumDraft {
            floor_id: 3,
            position: DVec2::new(0.25, 0.75),
            name: "Kitchen".into(),
            description: String::new(),
            kind: FulcrumType::Kitchen,
            facing_direction: Some(FacingDirection::Up),
            has_qr: false,
        };
        let value = serde_json::to_value(FulcrumSaveDto::from(&draft)).expect("serialisierbar");
        assert_eq!(value["type"], "KITCHEN");
        assert_eq!(value["floorId"], 3);
        assert!(value["facingDirection"].is_null());
    }
}
