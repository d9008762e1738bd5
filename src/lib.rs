//! BuildMap Floor Editor Library.
//! Editor-Kern für Grundrisse als Library exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod backend;
pub mod core;
pub mod shared;
pub mod storage;
pub mod svg;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, EditorEvent, PointerButton, UiState,
    ViewState,
};
pub use backend::{BackendError, FloorPlanBackend, HttpBackend, InMemoryBackend};
pub use core::{
    Connection, ConnectionGroup, EditorViewport, Floor, Fulcrum, FulcrumType, GridSettings,
    SpatialIndex, SpatialMatch, WaypointGraph,
};
pub use shared::{EditorOptions, RenderScene};
pub use storage::{FileGridOffsetStore, GridOffsetStore, MemoryGridOffsetStore};
