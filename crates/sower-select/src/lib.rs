#![forbid(unsafe_code)]
//! sower-select: the seed-node selection engine.
//!
//! # Overview
//!
//! Given a directed [`AdjacencyGraph`](sower_core::AdjacencyGraph) and a
//! [`SelectionRequest`] of per-metric quotas, [`SeedSelector`] returns the
//! top-ranked seed nodes for each metric. Metrics run in a fixed priority
//! order; a node claimed by an earlier metric is ineligible for later ones.
//! An optional entropy parameter relaxes the strict top-k by sampling the
//! final quota uniformly from an over-provisioned candidate pool.
//!
//! # Conventions
//!
//! - **Errors**: library errors are `thiserror` enums; invalid requests are
//!   rejected at selector construction, before any graph work.
//! - **Logging**: use `tracing` macros (`info!`, `debug!`, `trace!`).

pub mod metrics;
pub mod select;
pub mod topk;

pub use metrics::ExactCentrality;
pub use select::centrality::CentralityProvider;
pub use select::{Metric, RequestError, Selection, SelectionRequest, SeedSelector};
pub use topk::{BoundedTopK, RankedCandidate};
