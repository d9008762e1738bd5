//! Canvas-Gesten: Pan, Drag-to-Connect und Raster-Griff.
//!
//! Höchstens eine Geste ist aktiv; `ActiveGesture` hält sie samt ihrer
//! Host-Ressourcen.

mod connect_drag;
mod grid_drag;
mod pan;
pub mod pointer_host;

pub use connect_drag::{resolve_target, ConnectDrag, ConnectOutcome, TempConnection};
pub use grid_drag::{GridDrag, GridHandleState, GridPress};
pub use pan::PanGesture;
pub use pointer_host::{
    CaptureGuard, DocumentPointerGuard, NoopPointerHost, PointerHost, RecordingPointerHost,
    SharedPointerHost,
};

/// Aktuell laufende Canvas-Geste.
#[derive(Debug, Default)]
pub enum ActiveGesture {
    #[default]
    None,
    Pan(PanGesture),
    Connect(ConnectDrag),
    Grid(GridDrag),
}

impl ActiveGesture {
    /// Ob keine Geste läuft.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Vorschau-Verbindung, falls Drag-to-Connect läuft.
    pub fn temp_connection(&self) -> Option<&TempConnection> {
        match self {
            Self::Connect(drag) => Some(&drag.temp),
            _ => None,
        }
    }

    /// Entnimmt die Geste und lässt `None` zurück.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
