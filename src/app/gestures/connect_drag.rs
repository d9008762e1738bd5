//! Drag-to-Connect: vom Marker ziehen, über einem anderen Marker loslassen.
//!
//! `Idle → Dragging(from, preview) → Idle | Committed(from, to)`.

use glam::DVec2;

use super::pointer_host::{DocumentPointerGuard, SharedPointerHost};
use crate::core::SpatialIndex;

/// Vorschau-Verbindung, existiert nur während der Geste.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempConnection {
    pub from: u64,
    /// Display-Position des Start-Markers
    pub from_pos: DVec2,
    /// Aktuelle Display-Position des Pointers
    pub to_pos: DVec2,
}

/// Ergebnis beim Loslassen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Committed { from: u64, to: u64 },
    Discarded,
}

/// Laufende Drag-to-Connect-Geste.
#[derive(Debug)]
pub struct ConnectDrag {
    pub temp: TempConnection,
    _subscription: DocumentPointerGuard,
}

impl ConnectDrag {
    /// Beginnt am Marker `from` (Display-Position `from_pos`).
    pub fn begin(from: u64, from_pos: DVec2, host: &SharedPointerHost) -> Self {
        log::debug!("Drag-to-Connect gestartet an Fulcrum {}", from);
        Self {
            temp: TempConnection {
                from,
                from_pos,
                to_pos: from_pos,
            },
            _subscription: DocumentPointerGuard::subscribe(host),
        }
    }

    /// Führt die Vorschau zum Display-Punkt `display_pos` nach.
    pub fn update(&mut self, display_pos: DVec2) {
        self.temp.to_pos = display_pos;
    }

    /// Beendet die Geste mit Loslass-Punkt und Marker-Positionen im Screen-Raum.
    pub fn finish(
        self,
        release_screen: DVec2,
        markers_screen: impl IntoIterator<Item = (u64, DVec2)>,
        hit_radius_px: f64,
    ) -> ConnectOutcome {
        let index = SpatialIndex::from_points(markers_screen);
        let outcome = resolve_target(self.temp.from, release_screen, &index, hit_radius_px);
        log::debug!("Drag-to-Connect beendet: {:?}", outcome);
        outcome
    }
}

/// Nächster Marker zum Loslass-Punkt; Commit nur innerhalb des Radius und ungleich `from`.
pub fn resolve_target(
    from: u64,
    release_screen: DVec2,
    index: &SpatialIndex,
    hit_radius_px: f64,
) -> ConnectOutcome {
    match index.nearest_within(release_screen, hit_radius_px) {
        Some(hit) if hit.fulcrum_id != from => ConnectOutcome::Committed {
            from,
            to: hit.fulcrum_id,
        },
        _ => ConnectOutcome::Discarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SpatialIndex {
        SpatialIndex::from_points([
            (1, DVec2::new(100.0, 100.0)),
            (2, DVec2::new(300.0, 120.0)),
        ])
    }

    #[test]
    fn test_release_near_target_commits() {
        let outcome = resolve_target(1, DVec2::new(310.0, 130.0), &index(), 30.0);
        assert_eq!(outcome, ConnectOutcome::Committed { from: 1, to: 2 });
    }

    #[test]
    fn test_release_far_away_discards() {
        let outcome = resolve_target(1, DVec2::new(200.0, 300.0), &index(), 30.0);
        assert_eq!(outcome, ConnectOutcome::Discarded);
    }

    #[test]
    fn test_release_on_source_discards() {
        let outcome = resolve_target(1, DVec2::new(102.0, 98.0), &index(), 30.0);
        assert_eq!(outcome, ConnectOutcome::Discarded);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let outcome = resolve_target(1, DVec2::new(330.0, 120.0), &index(), 30.0);
        assert_eq!(outcome, ConnectOutcome::Discarded);
    }
}
