#![forbid(unsafe_code)]
//! sower-core: graph data model and ingestion.
//!
//! # Conventions
//!
//! - **Errors**: library errors are `thiserror` enums; fallible operations
//!   return `Result` and propagate with `?`.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod error;
pub mod graph;

pub use error::GraphError;
pub use graph::{AdjacencyGraph, NodeId};
