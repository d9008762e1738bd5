//! Application State: geladenes Stockwerk, Graph, View, Gesten und Modals.

mod app_state;
mod debounce;
mod editor;
mod loads;
mod view;

pub use app_state::AppState;
pub use debounce::Debounce;
pub use editor::EditorState;
pub use loads::{LoadTarget, LoadTicket, LoadTracker};
pub use view::ViewState;

/// Meldungen für den Host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Blockierende Fehlermeldung, bis der Nutzer sie bestätigt
    pub error_message: Option<String>,
    /// Letzte Statusmeldung
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt einen leeren UI-Zustand.
    pub fn new() -> Self {
        Self::default()
    }
}
