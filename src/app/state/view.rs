use glam::DVec2;

use super::Debounce;
use crate::core::coords::{self, ImageRect};
use crate::core::{EditorViewport, GridSettings};
use crate::shared::EditorOptions;
use crate::svg::DEFAULT_PLAN_SIZE;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Pan/Zoom des Content-Layers
    pub viewport: EditorViewport,
    /// Raster und Snap
    pub grid: GridSettings,
    /// Linke obere Ecke des Containers in Seitenkoordinaten
    pub container_origin: DVec2,
    /// Aktuelle Container-Größe in Pixeln
    pub container_size: DVec2,
    /// Koordinatenraum des Grundrisses (viewBox bzw. Bildgröße)
    pub plan_size: DVec2,
    /// Dargestelltes Grundriss-Rechteck im Content-Layer
    pub image_rect: ImageRect,
    /// Wartende Container-Größe bis zum Ablauf des Resize-Debounce
    pub pending_resize: Debounce<DVec2>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}

impl ViewState {
    /// Erstellt den View-Zustand aus den Optionen.
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            viewport: EditorViewport::with_limits(options.scale_min, options.scale_max),
            grid: GridSettings::with_bounds(options.grid_step_bounds()),
            container_origin: DVec2::ZERO,
            container_size: DVec2::ZERO,
            plan_size: DEFAULT_PLAN_SIZE,
            image_rect: ImageRect::default(),
            pending_resize: Debounce::new(options.resize_debounce_ms),
        }
    }

    /// Seitenkoordinate → container-relativ.
    pub fn to_local(&self, pointer: DVec2) -> DVec2 {
        pointer - self.container_origin
    }

    /// Seitenkoordinate → normalisierte Plan-Position (ungeklemmt).
    pub fn to_normalized(&self, pointer: DVec2) -> DVec2 {
        coords::to_normalized(
            pointer,
            self.container_origin,
            self.image_rect,
            self.viewport.offset,
            self.viewport.scale,
        )
    }

    /// Seitenkoordinate → Display-Punkt im Content-Layer.
    pub fn to_display_from_pointer(&self, pointer: DVec2) -> DVec2 {
        coords::from_screen(
            self.to_local(pointer),
            self.viewport.offset,
            self.viewport.scale,
        )
    }

    /// Normalisierte Position → Display-Punkt.
    pub fn display_position(&self, position: DVec2) -> DVec2 {
        coords::to_display(position, self.image_rect)
    }

    /// Normalisierte Position → container-relativer Screen-Punkt.
    pub fn screen_position(&self, position: DVec2) -> DVec2 {
        coords::to_screen(
            self.display_position(position),
            self.viewport.offset,
            self.viewport.scale,
        )
    }

    /// Mittelpunkt des Containers (container-relativ).
    pub fn container_center(&self) -> DVec2 {
        self.container_size * 0.5
    }

    /// Berechnet das Grundriss-Rechteck für Container- und Plangröße neu.
    pub fn refit(&mut self) {
        self.image_rect = ImageRect::fit(self.container_size, self.plan_size);
    }
}
