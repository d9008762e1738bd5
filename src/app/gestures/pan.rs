//! Pan-Geste: verschiebt den Viewport um die Pointer-Deltas.

use glam::DVec2;

use super::pointer_host::{DocumentPointerGuard, SharedPointerHost};
use crate::core::EditorViewport;

/// Laufender Pan; hält das Dokument-Abonnement bis zum Ende.
#[derive(Debug)]
pub struct PanGesture {
    _subscription: DocumentPointerGuard,
}

impl PanGesture {
    /// Startet den Pan an `pointer` (container-relativ).
    pub fn begin(viewport: &mut EditorViewport, pointer: DVec2, host: &SharedPointerHost) -> Self {
        viewport.begin_drag(pointer);
        log::debug!("Pan gestartet bei ({:.1}, {:.1})", pointer.x, pointer.y);
        Self {
            _subscription: DocumentPointerGuard::subscribe(host),
        }
    }

    /// Überträgt die Bewegung bis `pointer` auf den Viewport.
    pub fn update(&self, viewport: &mut EditorViewport, pointer: DVec2) -> DVec2 {
        viewport.drag_to(pointer)
    }

    /// Beendet den Pan; das Abonnement endet mit `self`.
    pub fn end(self, viewport: &mut EditorViewport) {
        viewport.end_drag();
        log::debug!("Pan beendet");
    }
}
