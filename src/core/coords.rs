//! Koordinaten-Mapper zwischen Pointer-, Container-, Content- und Plan-Koordinaten.
//!
//! Drei Räume sind beteiligt:
//! - **Screen**: Pixel relativ zum Container (nach Pan/Zoom)
//! - **Display**: Pixel im untransformierten Content-Layer (Bild liegt bei `ImageRect`)
//! - **Normalisiert**: Position relativ zum Grundriss, `[0, 1]` pro Achse
//!
//! Alle Funktionen sind rein und zustandslos.

use glam::DVec2;

/// Darstellungsrechteck des Grundrisses im Content-Layer (vor Pan/Zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    /// Linke obere Ecke im Content-Layer
    pub origin: DVec2,
    /// Dargestellte Größe in Pixeln
    pub size: DVec2,
}

impl Default for ImageRect {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            size: DVec2::ONE,
        }
    }
}

impl ImageRect {
    /// Erstellt ein Rechteck aus Ursprung und Größe.
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Self { origin, size }
    }

    /// Passt ein Bild mit `image_size` "contain"-artig und zentriert in den Container ein.
    ///
    /// Leere Container oder Bilder liefern ein Rechteck der Größe des Containers.
    pub fn fit(container_size: DVec2, image_size: DVec2) -> Self {
        if image_size.x <= 0.0
            || image_size.y <= 0.0
            || container_size.x <= 0.0
            || container_size.y <= 0.0
        {
            return Self::new(DVec2::ZERO, container_size.max(DVec2::ONE));
        }

        let factor = (container_size.x / image_size.x).min(container_size.y / image_size.y);
        let size = image_size * factor;
        let origin = (container_size - size) * 0.5;
        Self { origin, size }
    }

    /// Größe mit Schutz gegen Division durch Null (`0` → `1`).
    pub fn safe_size(&self) -> DVec2 {
        DVec2::new(non_zero(self.size.x), non_zero(self.size.y))
    }
}

fn non_zero(value: f64) -> f64 {
    if value.abs() <= f64::EPSILON || !value.is_finite() {
        1.0
    } else {
        value
    }
}

/// Rechnet einen Pointer-Punkt (Seitenkoordinaten) in normalisierte Plan-Koordinaten um.
///
/// Das Ergebnis wird nicht geklemmt.
pub fn to_normalized(
    pointer: DVec2,
    container_origin: DVec2,
    image_rect: ImageRect,
    offset: DVec2,
    scale: f64,
) -> DVec2 {
    let content = from_screen(pointer - container_origin, offset, scale);
    (content - image_rect.origin) / image_rect.safe_size()
}

/// Normalisierte Position → Display-Punkt im Content-Layer.
pub fn to_display(position: DVec2, image_rect: ImageRect) -> DVec2 {
    image_rect.origin + position * image_rect.size
}

/// Display-Punkt → Container-relativer Screen-Punkt.
pub fn to_screen(display: DVec2, offset: DVec2, scale: f64) -> DVec2 {
    display * scale + offset
}

/// Container-relativer Screen-Punkt → Display-Punkt.
pub fn from_screen(screen: DVec2, offset: DVec2, scale: f64) -> DVec2 {
    (screen - offset) / non_zero(scale)
}

/// Klemmt einen Wert auf `[0, 1]`; nicht-endliche Werte werden zu `0`.
pub fn clamp01(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Klemmt beide Achsen auf `[0, 1]`.
pub fn clamp01_vec(value: DVec2) -> DVec2 {
    DVec2::new(clamp01(value.x), clamp01(value.y))
}

/// Euklidische Distanz zweier Punkte.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Kürzeste Distanz eines Punktes zu einer Strecke `a..b`.
pub fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_pointer_to_normalized_and_back() {
        let rect = ImageRect::new(DVec2::new(40.0, 25.0), DVec2::new(800.0, 600.0));
        let container_origin = DVec2::new(120.0, 64.0);
        let offset = DVec2::new(-37.5, 12.25);
        let scale = 1.75;

        for pointer in [
            DVec2::new(300.0, 200.0),
            DVec2::new(120.0, 64.0),
            DVec2::new(1500.0, -20.0),
        ] {
            let n = to_normalized(pointer, container_origin, rect, offset, scale);
            let back = to_screen(to_display(n, rect), offset, scale) + container_origin;
            assert_relative_eq!(back.x, pointer.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, pointer.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_to_normalized_is_not_clamped() {
        let rect = ImageRect::new(DVec2::ZERO, DVec2::new(100.0, 100.0));
        let n = to_normalized(DVec2::new(-50.0, 250.0), DVec2::ZERO, rect, DVec2::ZERO, 1.0);
        assert_relative_eq!(n.x, -0.5);
        assert_relative_eq!(n.y, 2.5);
    }

    #[test]
    fn test_fit_contains_and_centers_image() {
        let rect = ImageRect::fit(DVec2::new(1000.0, 500.0), DVec2::new(800.0, 600.0));
        assert_relative_eq!(rect.size.y, 500.0);
        assert_relative_eq!(rect.size.x, 800.0 * 500.0 / 600.0);
        assert_relative_eq!(rect.origin.y, 0.0);
        assert_relative_eq!(rect.origin.x, (1000.0 - rect.size.x) / 2.0);
    }

    #[test]
    fn test_fit_with_empty_image_falls_back_to_container() {
        let rect = ImageRect::fit(DVec2::new(300.0, 200.0), DVec2::ZERO);
        assert_eq!(rect.origin, DVec2::ZERO);
        assert_eq!(rect.size, DVec2::new(300.0, 200.0));
    }

    #[test]
    fn test_zero_sized_rect_does_not_produce_nan() {
        let rect = ImageRect::new(DVec2::ZERO, DVec2::ZERO);
        let n = to_normalized(DVec2::new(10.0, 10.0), DVec2::ZERO, rect, DVec2::ZERO, 1.0);
        assert!(n.x.is_finite() && n.y.is_finite());
    }

    #[test]
    fn test_clamp01_handles_nan_and_bounds() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn test_distance_to_segment_projects_onto_segment() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        assert_relative_eq!(distance_to_segment(DVec2::new(5.0, 3.0), a, b), 3.0);
        assert_relative_eq!(distance_to_segment(DVec2::new(-4.0, 3.0), a, b), 5.0);
        assert_relative_eq!(distance_to_segment(DVec2::new(2.0, 2.0), a, a), 8f64.sqrt());
    }
}
