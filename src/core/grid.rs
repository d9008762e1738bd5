//! Raster-Overlay und Snap-Engine in normalisierten Plan-Koordinaten.
//!
//! Die Schrittweite wird nur verdoppelt oder halbiert, der Ursprung des Rasters
//! (Offset) wird unabhängig verschoben und liegt immer in `[0, step)`.

use glam::DVec2;

use super::coords::clamp01;

/// Standard-Rasterweite (normalisiert).
pub const GRID_STEP_DEFAULT: f64 = 0.04;
/// Minimale Rasterweite.
pub const GRID_STEP_MIN: f64 = 0.005;
/// Maximale Rasterweite.
pub const GRID_STEP_MAX: f64 = 0.2;

/// Grenzen der Rasterweite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStepBounds {
    /// Startwert
    pub default: f64,
    /// Untere Grenze
    pub min: f64,
    /// Obere Grenze
    pub max: f64,
}

impl Default for GridStepBounds {
    fn default() -> Self {
        Self {
            default: GRID_STEP_DEFAULT,
            min: GRID_STEP_MIN,
            max: GRID_STEP_MAX,
        }
    }
}

impl GridStepBounds {
    /// Klemmt einen Kandidaten auf die Grenzen und rundet auf 6 Nachkommastellen.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return round6(self.default);
        }
        round6(value.clamp(self.min, self.max))
    }

    fn sanitized(self) -> Self {
        if self.min > 0.0 && self.min <= self.max && self.default.is_finite() {
            Self {
                default: self.default.clamp(self.min, self.max),
                ..self
            }
        } else {
            Self::default()
        }
    }
}

/// Session-Zustand des Rasters.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Raster sichtbar und Snapping aktiv
    pub enabled: bool,
    step: f64,
    offset: DVec2,
    bounds: GridStepBounds,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSettings {
    /// Deaktiviertes Raster mit Standardweite und Offset `(0, 0)`.
    pub fn new() -> Self {
        Self::with_bounds(GridStepBounds::default())
    }

    /// Raster mit eigenen Weitengrenzen.
    pub fn with_bounds(bounds: GridStepBounds) -> Self {
        let bounds = bounds.sanitized();
        Self {
            enabled: false,
            step: bounds.clamp(bounds.default),
            offset: DVec2::ZERO,
            bounds,
        }
    }

    /// Aktuelle Rasterweite.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Aktueller Raster-Ursprung, pro Achse in `[0, step)`.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Weitengrenzen dieses Rasters.
    pub fn bounds(&self) -> GridStepBounds {
        self.bounds
    }

    /// Schaltet das Raster um und liefert den neuen Zustand.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Verdoppelt die Rasterweite (geklemmt).
    pub fn increase_step(&mut self) -> f64 {
        self.set_step(self.step * 2.0)
    }

    /// Halbiert die Rasterweite (geklemmt).
    pub fn decrease_step(&mut self) -> f64 {
        self.set_step(self.step / 2.0)
    }

    fn set_step(&mut self, candidate: f64) -> f64 {
        self.step = self.bounds.clamp(candidate);
        self.offset = wrap_vec(self.offset, self.step);
        self.step
    }

    /// Setzt den Raster-Ursprung; jede Achse wird in `[0, step)` gefaltet.
    pub fn set_offset(&mut self, offset: DVec2) -> DVec2 {
        self.offset = wrap_vec(offset, self.step);
        self.offset
    }

    /// Setzt den Raster-Ursprung auf `(0, 0)`.
    pub fn reset_offset(&mut self) {
        self.offset = DVec2::ZERO;
    }

    /// Rastet einen Punkt unter Berücksichtigung des Offsets ein.
    pub fn snap_point(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            snap_with_offset(point.x, self.step, self.offset.x),
            snap_with_offset(point.y, self.step, self.offset.y),
        )
    }

    /// Rastet nur ein, wenn das Raster aktiv ist; sonst wird auf `[0, 1]` geklemmt.
    pub fn snap_if_enabled(&self, point: DVec2) -> DVec2 {
        if self.enabled {
            self.snap_point(point)
        } else {
            DVec2::new(clamp01(point.x), clamp01(point.y))
        }
    }

    /// Rasterlinien-Positionen einer Achse in `[0, 1]`.
    pub fn line_positions(&self, axis_offset: f64) -> Vec<f64> {
        if self.step <= 0.0 {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity((1.0 / self.step) as usize + 2);
        let mut k = 0u32;
        loop {
            let position = axis_offset + f64::from(k) * self.step;
            if position > 1.0 + 1e-9 {
                break;
            }
            lines.push(position);
            k += 1;
        }
        lines
    }
}

/// Rastet `value` auf ein Vielfaches von `step` ein und klemmt auf `[0, 1]`.
pub fn snap(value: f64, step: f64) -> f64 {
    snap_with_offset(value, step, 0.0)
}

/// Rastet `value` auf `offset + k·step` ein und klemmt auf `[0, 1]`.
pub fn snap_with_offset(value: f64, step: f64, offset: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return clamp01(value);
    }
    clamp01(((value - offset) / step).round() * step + offset)
}

/// Faltet `value` in `[0, step)`.
pub fn wrap(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(step);
    if wrapped >= step || wrapped < 0.0 {
        0.0
    } else {
        wrapped
    }
}

/// Faltet beide Achsen in `[0, step)`.
pub fn wrap_vec(value: DVec2, step: f64) -> DVec2 {
    DVec2::new(wrap(value.x, step), wrap(value.y, step))
}

/// Normalisiert einen gespeicherten Offset: endlich und auf `[0, 1]` geklemmt.
pub fn normalize_stored_offset(x: f64, y: f64) -> DVec2 {
    DVec2::new(clamp01(x), clamp01(y))
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_doubles_until_max() {
        let mut grid = GridSettings::new();
        assert_relative_eq!(grid.step(), 0.04);
        assert_relative_eq!(grid.increase_step(), 0.08);
        assert_relative_eq!(grid.increase_step(), 0.16);
        assert_relative_eq!(grid.increase_step(), 0.2);
        assert_relative_eq!(grid.increase_step(), 0.2);
    }

    #[test]
    fn test_step_halves_until_min() {
        let mut grid = GridSettings::new();
        for _ in 0..10 {
            grid.decrease_step();
        }
        assert_relative_eq!(grid.step(), GRID_STEP_MIN);
    }

    #[test]
    fn test_step_is_rounded_to_six_decimals() {
        let mut grid = GridSettings::new();
        grid.decrease_step();
        grid.decrease_step();
        grid.decrease_step();
        assert_eq!(grid.step(), 0.005);
    }

    #[test]
    fn test_wrap_stays_in_half_open_interval() {
        let step = 0.04;
        for value in [-1.0, -0.04, -0.0399999, 0.0, 0.04, 0.08, 0.123, 17.3, -3.9e-17] {
            let w = wrap(value, step);
            assert!((0.0..step).contains(&w), "wrap({value}) = {w}");
        }
        assert_relative_eq!(wrap(0.05, 0.04), 0.01, epsilon = 1e-12);
        assert_relative_eq!(wrap(-0.01, 0.04), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_rewrapped_when_step_shrinks() {
        let mut grid = GridSettings::new();
        grid.set_offset(DVec2::new(0.03, 0.01));
        grid.decrease_step();
        assert!(grid.offset().x < grid.step());
        assert_relative_eq!(grid.offset().x, 0.01, epsilon = 1e-12);
        assert_relative_eq!(grid.offset().y, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_snap_rounds_and_clamps() {
        assert_relative_eq!(snap(0.41, 0.04), 0.4, epsilon = 1e-12);
        assert_relative_eq!(snap(0.99, 0.04), 1.0);
        assert_relative_eq!(snap(-0.3, 0.04), 0.0);
    }

    #[test]
    fn test_snap_with_zero_offset_equals_plain_snap() {
        for value in [0.0, 0.013, 0.5, 0.777, 1.0] {
            assert_relative_eq!(snap_with_offset(value, 0.04, 0.0), snap(value, 0.04));
        }
    }

    #[test]
    fn test_snap_point_honours_offset() {
        let mut grid = GridSettings::new();
        grid.set_offset(DVec2::new(0.01, 0.01));
        let snapped = grid.snap_point(DVec2::new(0.4, 0.6));
        assert_relative_eq!(snapped.x, 0.41, epsilon = 1e-12);
        assert_relative_eq!(snapped.y, 0.61, epsilon = 1e-12);
    }

    #[test]
    fn test_snap_if_enabled_passes_through_when_disabled() {
        let grid = GridSettings::new();
        let point = grid.snap_if_enabled(DVec2::new(0.4123, 0.6));
        assert_eq!(point, DVec2::new(0.4123, 0.6));
    }

    #[test]
    fn test_line_positions_start_at_offset() {
        let mut grid = GridSettings::new();
        grid.increase_step();
        grid.increase_step();
        grid.set_offset(DVec2::new(0.05, 0.0));
        let lines = grid.line_positions(grid.offset().x);
        assert_relative_eq!(lines[0], 0.05);
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|v| *v <= 1.0 + 1e-9));
    }

    #[test]
    fn test_normalize_stored_offset() {
        assert_eq!(normalize_stored_offset(f64::NAN, 2.0), DVec2::new(0.0, 1.0));
        assert_eq!(normalize_stored_offset(0.02, 0.03), DVec2::new(0.02, 0.03));
    }
}
