//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod forms;
pub mod gestures;
pub mod handlers;
mod intent_mapping;
pub mod modals;
pub mod render_scene;
pub mod services;
/// Application State und Controller
///
/// Dieses Modul verwaltet den Zustand des Editors (Stockwerk, Graph, View, Gesten, Modals).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent, EditorEvent, PointerButton};
pub use forms::{ConnectionForm, FulcrumForm, ValidationErrors};
pub use modals::{EditorModals, ModalMode};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, EditorState, LoadTicket, UiState, ViewState};
