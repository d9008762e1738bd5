//! Spatial-Index (KD-Tree) für Treffer-Abfragen auf Fulcrum-Markern.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Fulcrums
    pub fulcrum_id: u64,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Index über Marker-Positionen in einem beliebigen 2D-Raum.
///
/// Der Aufrufer entscheidet, in welchem Raum (Display oder Screen) die Punkte liegen.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    ids: Vec<u64>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            ids: Vec::new(),
        }
    }

    /// Baut einen Index aus `(id, position)`-Paaren.
    pub fn from_points(points: impl IntoIterator<Item = (u64, DVec2)>) -> Self {
        let mut points: Vec<(u64, DVec2)> = points.into_iter().collect();
        points.sort_unstable_by_key(|(id, _)| *id);

        let entries: Vec<[f64; 2]> = points.iter().map(|(_, p)| [p.x, p.y]).collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        let ids = points.into_iter().map(|(id, _)| id).collect();

        Self { tree, ids }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Findet den nächsten Punkt zur Query-Position.
    pub fn nearest(&self, query: DVec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let fulcrum_id = *self.ids.get(result.item as usize)?;

        Some(SpatialMatch {
            fulcrum_id,
            distance: result.distance.sqrt(),
        })
    }

    /// Nächster Punkt, sofern er strikt näher als `radius` liegt.
    pub fn nearest_within(&self, query: DVec2, radius: f64) -> Option<SpatialMatch> {
        self.nearest(query).filter(|m| m.distance < radius)
    }
}
