//! Viewport des Grundriss-Editors: Pan-Offset und Zoom-Faktor.

use glam::DVec2;

/// Minimaler Zoom-Faktor.
pub const SCALE_MIN: f64 = 0.1;
/// Maximaler Zoom-Faktor.
pub const SCALE_MAX: f64 = 5.0;
/// Standard-Empfindlichkeit für Mausrad-Zoom (pro Delta-Einheit).
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.001;

/// Pan/Zoom-Zustand des Editors (nicht persistiert).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorViewport {
    /// Zoom-Faktor, immer in `[min_scale, max_scale]`
    pub scale: f64,
    /// Translation des Content-Layers in Container-Pixeln
    pub offset: DVec2,
    /// `true`, solange ein Pan läuft
    pub is_dragging: bool,
    /// Letzte Pointer-Position des laufenden Pans
    pub last_mouse_pos: DVec2,
    min_scale: f64,
    max_scale: f64,
}

impl Default for EditorViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorViewport {
    /// Erstellt einen Viewport mit Scale 1 und Offset 0.
    pub fn new() -> Self {
        Self::with_limits(SCALE_MIN, SCALE_MAX)
    }

    /// Erstellt einen Viewport mit eigenen Zoom-Grenzen.
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale > 0.0 && min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (SCALE_MIN, SCALE_MAX)
        };
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            offset: DVec2::ZERO,
            is_dragging: false,
            last_mouse_pos: DVec2::ZERO,
            min_scale,
            max_scale,
        }
    }

    /// Untere Zoom-Grenze.
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Obere Zoom-Grenze.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Setzt Scale und Offset zurück (neuer Grundriss geladen).
    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
        self.offset = DVec2::ZERO;
        self.is_dragging = false;
        self.last_mouse_pos = DVec2::ZERO;
    }

    /// Verschiebt den Content-Layer um ein Pixel-Delta.
    pub fn pan(&mut self, delta: DVec2) {
        self.offset += delta;
    }

    /// Beginnt einen Pan an der Pointer-Position.
    pub fn begin_drag(&mut self, pointer: DVec2) {
        self.is_dragging = true;
        self.last_mouse_pos = pointer;
    }

    /// Führt den laufenden Pan bis `pointer` fort und liefert das angewendete Delta.
    pub fn drag_to(&mut self, pointer: DVec2) -> DVec2 {
        if !self.is_dragging {
            return DVec2::ZERO;
        }
        let delta = pointer - self.last_mouse_pos;
        self.pan(delta);
        self.last_mouse_pos = pointer;
        delta
    }

    /// Beendet den laufenden Pan.
    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    /// Zoomt für ein Wheel-Event so, dass der Punkt unter dem Cursor fix bleibt.
    ///
    /// `cursor` ist container-relativ.
    pub fn zoom_wheel(&mut self, cursor: DVec2, delta_y: f64, sensitivity: f64) {
        let new_scale = wheel_scale(self.scale, delta_y, sensitivity, self.min_scale, self.max_scale);
        self.zoom_to_point(cursor, new_scale);
    }

    /// Multipliziert den Zoom mit `factor` um den Fokuspunkt `focus` (container-relativ).
    pub fn zoom_by(&mut self, factor: f64, focus: DVec2) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.zoom_to_point(focus, new_scale);
    }

    /// Setzt den Zoom auf `new_scale` und hält `cursor` fix.
    pub fn zoom_to_point(&mut self, cursor: DVec2, new_scale: f64) {
        let new_scale = new_scale.clamp(self.min_scale, self.max_scale);
        self.offset = zoom_offset(self.scale, new_scale, cursor, self.offset);
        self.scale = new_scale;
    }
}

/// Neuer Zoom-Faktor für ein Wheel-Delta: `clamp(scale · (1 − Δy · s), min, max)`.
pub fn wheel_scale(scale: f64, delta_y: f64, sensitivity: f64, min: f64, max: f64) -> f64 {
    let candidate = scale * (1.0 - delta_y * sensitivity);
    if candidate.is_finite() {
        candidate.clamp(min, max)
    } else {
        scale.clamp(min, max)
    }
}

/// Offset, der `cursor` beim Wechsel von `scale` zu `new_scale` unter dem Cursor hält.
pub fn zoom_offset(scale: f64, new_scale: f64, cursor: DVec2, offset: DVec2) -> DVec2 {
    if scale <= 0.0 {
        return offset;
    }
    cursor - (cursor - offset) * (new_scale / scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coords::from_screen;
    use approx::assert_relative_eq;

    #[test]
    fn test_zoom_keeps_content_point_under_cursor() {
        let mut viewport = EditorViewport::new();
        viewport.offset = DVec2::new(35.0, -12.0);
        viewport.scale = 1.3;
        let cursor = DVec2::new(410.0, 275.0);
        let before = from_screen(cursor, viewport.offset, viewport.scale);

        for delta in [120.0, -240.0, 53.0, -1.0] {
            viewport.zoom_wheel(cursor, delta, DEFAULT_ZOOM_SENSITIVITY);
            let after = from_screen(cursor, viewport.offset, viewport.scale);
            assert_relative_eq!(after.x, before.x, epsilon = 1e-9);
            assert_relative_eq!(after.y, before.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_wheel_scale_is_clamped() {
        assert_relative_eq!(wheel_scale(1.0, 5000.0, 0.001, 0.1, 5.0), 0.1);
        assert_relative_eq!(wheel_scale(4.0, -5000.0, 0.001, 0.1, 5.0), 5.0);
        assert_relative_eq!(wheel_scale(1.0, 100.0, 0.001, 0.1, 5.0), 0.9);
    }

    #[test]
    fn test_zoom_at_limit_leaves_offset_stable() {
        let mut viewport = EditorViewport::new();
        viewport.scale = SCALE_MAX;
        viewport.offset = DVec2::new(10.0, 20.0);
        viewport.zoom_wheel(DVec2::new(300.0, 300.0), -500.0, DEFAULT_ZOOM_SENSITIVITY);
        assert_relative_eq!(viewport.scale, SCALE_MAX);
        assert_relative_eq!(viewport.offset.x, 10.0);
        assert_relative_eq!(viewport.offset.y, 20.0);
    }

    #[test]
    fn test_drag_accumulates_pointer_deltas() {
        let mut viewport = EditorViewport::new();
        viewport.begin_drag(DVec2::new(100.0, 100.0));
        viewport.drag_to(DVec2::new(110.0, 95.0));
        viewport.drag_to(DVec2::new(130.0, 90.0));
        viewport.end_drag();
        assert_eq!(viewport.offset, DVec2::new(30.0, -10.0));
        assert!(!viewport.is_dragging);

        let delta = viewport.drag_to(DVec2::new(500.0, 500.0));
        assert_eq!(delta, DVec2::ZERO);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut viewport = EditorViewport::new();
        viewport.zoom_by(2.0, DVec2::new(50.0, 50.0));
        viewport.pan(DVec2::new(7.0, 8.0));
        viewport.reset();
        assert_relative_eq!(viewport.scale, 1.0);
        assert_eq!(viewport.offset, DVec2::ZERO);
    }

    #[test]
    fn test_invalid_limits_fall_back_to_defaults() {
        let viewport = EditorViewport::with_limits(3.0, 0.5);
        assert_relative_eq!(viewport.min_scale(), SCALE_MIN);
        assert_relative_eq!(viewport.max_scale(), SCALE_MAX);
    }
}
