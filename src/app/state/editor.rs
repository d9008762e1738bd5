use crate::app::gestures::{ActiveGesture, GridHandleState, NoopPointerHost, SharedPointerHost};
use std::cell::RefCell;
use std::rc::Rc;

/// Gesten-Zustand des Editors.
pub struct EditorState {
    /// Laufende Geste (höchstens eine)
    pub gesture: ActiveGesture,
    /// Doppelklick- und Capture-Historie des Raster-Griffs
    pub grid_handle: GridHandleState,
    /// Pointer-Fähigkeiten des Hosts
    pub pointer_host: SharedPointerHost,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Erstellt den Zustand ohne Pointer-Capture-Unterstützung.
    pub fn new() -> Self {
        Self::with_pointer_host(Rc::new(RefCell::new(NoopPointerHost)))
    }

    /// Erstellt den Zustand mit einem Host.
    pub fn with_pointer_host(pointer_host: SharedPointerHost) -> Self {
        Self {
            gesture: ActiveGesture::None,
            grid_handle: GridHandleState::default(),
            pointer_host,
        }
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("gesture", &self.gesture)
            .field("grid_handle", &self.grid_handle)
            .finish_non_exhaustive()
    }
}
