//! Core-Domänentypen: Fulcrums, Connections, Wegpunkt-Graph, Viewport, Raster, Spatial-Index.

pub mod connection;
pub mod connection_groups;
pub mod coords;
pub mod floor;
pub mod fulcrum;
pub mod grid;
pub mod interfloor;
pub mod spatial;
pub mod viewport;
pub mod waypoint_graph;

pub use connection::{normalize_interfloor_weight, Connection, ConnectionDraft};
pub use connection_groups::{group_connections, ConnectionGroup};
pub use coords::ImageRect;
pub use floor::{Floor, FloorUpdate};
pub use fulcrum::{FacingDirection, Fulcrum, FulcrumDraft, FulcrumRecord, FulcrumType};
pub use grid::{GridSettings, GridStepBounds};
pub use interfloor::{build_interfloor_rows, AreaGraph, InterfloorRow};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use viewport::EditorViewport;
pub use waypoint_graph::{FulcrumWithConnections, WaypointGraph};
