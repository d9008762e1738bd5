//! Externe Kollaborateure des Controllers: Backend, Offset-Speicher, Event-Listener.

use super::EditorEvent;
use crate::backend::FloorPlanBackend;
use crate::storage::GridOffsetStore;

type EventListener = Box<dyn FnMut(&EditorEvent)>;

/// Vom Host injizierte Dienste.
pub struct EditorServices {
    pub backend: Box<dyn FloorPlanBackend>,
    pub offsets: Box<dyn GridOffsetStore>,
    listener: Option<EventListener>,
}

impl EditorServices {
    /// Dienste ohne Listener.
    pub fn new(backend: Box<dyn FloorPlanBackend>, offsets: Box<dyn GridOffsetStore>) -> Self {
        Self {
            backend,
            offsets,
            listener: None,
        }
    }

    /// Setzt den Listener für Editor-Events (ersetzt einen vorhandenen).
    pub fn set_listener(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Meldet ein Event an den Listener.
    pub fn emit(&mut self, event: EditorEvent) {
        log::debug!("Event: {:?}", event);
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}
