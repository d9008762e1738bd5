//! Persistenz-Kollaborator: Stockwerke, Fulcrums und Verbindungen über das BuildMap-Backend.
//!
//! Der Editor-Kern spricht nur mit dem Trait `FloorPlanBackend`. `HttpBackend`
//! nutzt die REST-API, `InMemoryBackend` bildet dieselbe Semantik lokal ab.

pub mod dto;
mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::{BackendOperation, InMemoryBackend};

use crate::core::{
    ConnectionDraft, Floor, FloorUpdate, Fulcrum, FulcrumDraft, FulcrumWithConnections,
};

/// Fehler an der Backend-Grenze.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Nicht gefunden: {0}")]
    NotFound(String),
    #[error("Verbindung {from} -> {to} existiert bereits")]
    ConnectionAlreadyExists { from: u64, to: u64 },
    #[error("Nicht autorisiert")]
    Unauthorized,
    #[error("Anfrage abgelehnt ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Netzwerkfehler: {0}")]
    Transport(String),
    #[error("Antwort nicht lesbar: {0}")]
    Decode(String),
}

/// Request/Response-Vertrag zum Backend.
///
/// Jede Methode blockiert bis zur Antwort. Aufrufer ändern lokalen Zustand erst
/// nach Erfolg.
pub trait FloorPlanBackend {
    /// Aktive Stockwerke eines Mapping-Bereichs.
    fn floors_by_area(&mut self, area_id: u64) -> Result<Vec<Floor>, BackendError>;
    fn floor_by_id(&mut self, floor_id: u64) -> Result<Floor, BackendError>;
    fn update_floor(&mut self, floor_id: u64, update: &FloorUpdate) -> Result<Floor, BackendError>;

    /// Fulcrums eines Stockwerks inklusive soft-gelöschter Records.
    fn fulcrums_by_floor(
        &mut self,
        floor_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError>;
    /// Fulcrums aller Stockwerke eines Bereichs.
    fn fulcrums_by_area(
        &mut self,
        area_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError>;
    fn create_fulcrum(&mut self, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError>;
    fn update_fulcrum(&mut self, id: u64, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError>;
    /// Soft-Delete.
    fn delete_fulcrum(&mut self, id: u64) -> Result<(), BackendError>;

    /// Legt `from → draft.connected_fulcrum_id` an; existiert das Paar bereits,
    /// schlägt der Aufruf mit `ConnectionAlreadyExists` fehl.
    fn add_connection(&mut self, from: u64, draft: &ConnectionDraft) -> Result<(), BackendError>;
    fn remove_connection(&mut self, from: u64, to: u64) -> Result<(), BackendError>;
}
