//! Render-Szene als expliziter Übergabevertrag zwischen Editor-Kern und Host.
//!
//! Alle Positionen liegen im Display-Raum (Content-Layer vor Pan/Zoom); der Host
//! wendet `offset`/`scale` als Transformation auf den gesamten Layer an.

use std::sync::Arc;

use glam::DVec2;

use crate::core::{ConnectionGroup, FulcrumType, ImageRect};

/// Marker eines Fulcrums.
#[derive(Debug, Clone, PartialEq)]
pub struct FulcrumMarker {
    pub id: u64,
    pub name: String,
    pub kind: FulcrumType,
    /// Position im Content-Layer
    pub display: DVec2,
}

/// Darzustellende Verbindung oder Verbindungspaar.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionLine {
    pub group: ConnectionGroup,
    /// Display-Position des ersten Endpunkts (`from` bzw. `a`)
    pub start: DVec2,
    /// Display-Position des zweiten Endpunkts (`to` bzw. `b`)
    pub end: DVec2,
}

/// Gestrichelte Vorschau während Drag-to-Connect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub from: u64,
    pub start: DVec2,
    pub end: DVec2,
}

/// Rasterlinien im Display-Raum.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridOverlay {
    /// x-Positionen der vertikalen Linien
    pub vertical: Vec<f64>,
    /// y-Positionen der horizontalen Linien
    pub horizontal: Vec<f64>,
    /// Griff zum Verschieben des Raster-Ursprungs
    pub handle: DVec2,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct RenderScene {
    /// SVG-Dokument des Grundrisses (geteilt, O(1)-Clone pro Frame)
    pub svg_plan: Option<Arc<str>>,
    pub image_rect: ImageRect,
    pub scale: f64,
    pub offset: DVec2,
    pub fulcrums: Vec<FulcrumMarker>,
    pub connections: Vec<ConnectionLine>,
    pub preview: Option<PreviewLine>,
    pub grid: Option<GridOverlay>,
}

impl RenderScene {
    /// Gibt zurück, ob ein Grundriss für Rendering vorhanden ist.
    pub fn has_plan(&self) -> bool {
        self.svg_plan.is_some()
    }
}
