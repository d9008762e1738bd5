use crate::app::gestures::SharedPointerHost;
use crate::app::modals::EditorModals;
use crate::app::CommandLog;
use crate::core::{Floor, WaypointGraph};
use crate::shared::EditorOptions;
use std::sync::Arc;

use super::{EditorState, LoadTracker, UiState, ViewState};

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Aktuell geöffnetes Stockwerk (None = nichts geladen)
    pub floor: Option<Floor>,
    /// Dargestellter Grundriss; kann vom gespeicherten Plan abweichen (Upload)
    pub svg_plan: Option<Arc<str>>,
    /// Fulcrums und Verbindungen des Stockwerks
    pub graph: WaypointGraph,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Gesten-State
    pub editor: EditorState,
    /// Fulcrum- und Verbindungs-Modal
    pub modals: EditorModals,
    /// Laufende Ladevorgänge
    pub loads: LoadTracker,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit eigenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            floor: None,
            svg_plan: None,
            graph: WaypointGraph::new(0),
            view: ViewState::new(&options),
            ui: UiState::new(),
            editor: EditorState::new(),
            modals: EditorModals::default(),
            loads: LoadTracker::new(),
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Setzt den Pointer-Host für Dokument-Events und Capture.
    pub fn with_pointer_host(mut self, host: SharedPointerHost) -> Self {
        self.editor = EditorState::with_pointer_host(host);
        self
    }

    /// ID des geöffneten Stockwerks.
    pub fn floor_id(&self) -> Option<u64> {
        self.floor.as_ref().map(|f| f.id)
    }

    /// Gibt die Anzahl der Fulcrums zurück (für UI-Anzeige)
    pub fn fulcrum_count(&self) -> usize {
        self.graph.fulcrum_count()
    }

    /// Gibt die Anzahl der Connections zurück (für UI-Anzeige)
    pub fn connection_count(&self) -> usize {
        self.graph.connection_count()
    }

    /// Ob eine Geste oder ein Modal neue Canvas-Gesten sperrt.
    pub fn canvas_locked(&self) -> bool {
        !self.editor.gesture.is_idle() || self.modals.any_visible()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
