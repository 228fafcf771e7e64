//! Default centrality provider.
//!
//! # Overview
//!
//! Exact (non-approximate) centrality computations backing the
//! [`CentralityProvider`] boundary:
//!
//! - **Betweenness** (`betweenness`): Brandes' algorithm over the graph's
//!   petgraph view — which nodes act as bridges on shortest paths?
//! - **Closeness** (`closeness`): per-node BFS — which nodes reach the rest
//!   of the graph in few hops?
//!
//! Both return raw (unnormalized) scores; the selection adapter only needs
//! relative order.

pub mod betweenness;
pub mod closeness;

use std::collections::HashMap;

use sower_core::{AdjacencyGraph, NodeId};

use crate::select::centrality::CentralityProvider;

/// [`CentralityProvider`] backed by exact whole-graph traversals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCentrality;

impl CentralityProvider for ExactCentrality {
    fn betweenness(&self, graph: &AdjacencyGraph) -> HashMap<NodeId, f64> {
        betweenness::betweenness_centrality(graph)
    }

    fn closeness(&self, graph: &AdjacencyGraph, node: NodeId) -> Option<f64> {
        closeness::closeness_centrality(graph, node)
    }
}
