//! Use-Cases der Application-Layer-Orchestrierung.

pub mod connect;
pub mod floor;
pub mod graph;
pub mod grid;
pub mod interfloor;
pub mod modals;
pub mod viewport;
