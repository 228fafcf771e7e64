//! Boundary between selection and the centrality provider.
//!
//! Betweenness and closeness are computed by an external graph-analysis
//! provider; this module only consumes their output. Scores that are
//! non-positive or non-finite are filtered before ranking, and a per-node
//! closeness failure (`None`) simply omits that node from the ranking —
//! never a fatal error for the run.

use std::collections::{HashMap, HashSet};

use sower_core::{AdjacencyGraph, NodeId};
use tracing::instrument;

use crate::topk::BoundedTopK;

/// An external source of centrality scores.
///
/// Implementations compute betweenness for the whole graph in one call and
/// closeness one node at a time (closeness can be undefined per node, e.g.
/// for a node that reaches nothing).
pub trait CentralityProvider {
    /// Betweenness centrality score for every node in `graph`.
    fn betweenness(&self, graph: &AdjacencyGraph) -> HashMap<NodeId, f64>;

    /// Closeness centrality for one node, or `None` when undefined.
    fn closeness(&self, graph: &AdjacencyGraph, node: NodeId) -> Option<f64>;
}

/// Rank unclaimed nodes by betweenness and return up to `quota` seeds.
#[instrument(skip_all, fields(quota))]
pub(crate) fn betweenness_seeds<P: CentralityProvider>(
    provider: &P,
    graph: &AdjacencyGraph,
    claimed: &HashSet<NodeId>,
    quota: usize,
) -> Vec<NodeId> {
    if quota == 0 {
        return Vec::new();
    }
    let scores = provider.betweenness(graph);

    let mut topk = BoundedTopK::new(quota);
    for &node in graph.nodes() {
        if claimed.contains(&node) {
            continue;
        }
        let Some(&score) = scores.get(&node) else {
            continue;
        };
        if usable(score) {
            topk.insert(score, node);
        }
    }
    drain(&mut topk)
}

/// Rank unclaimed nodes by closeness and return up to `quota` seeds.
#[instrument(skip_all, fields(quota))]
pub(crate) fn closeness_seeds<P: CentralityProvider>(
    provider: &P,
    graph: &AdjacencyGraph,
    claimed: &HashSet<NodeId>,
    quota: usize,
) -> Vec<NodeId> {
    if quota == 0 {
        return Vec::new();
    }

    let mut topk = BoundedTopK::new(quota);
    for &node in graph.nodes() {
        if claimed.contains(&node) {
            continue;
        }
        // A failed per-node computation omits the node, nothing more.
        let Some(score) = provider.closeness(graph, node) else {
            continue;
        };
        if usable(score) {
            topk.insert(score, node);
        }
    }
    drain(&mut topk)
}

fn usable(score: f64) -> bool {
    score.is_finite() && score > 0.0
}

fn drain(topk: &mut BoundedTopK) -> Vec<NodeId> {
    let mut picked = Vec::with_capacity(topk.len());
    while let Some(candidate) = topk.pop_max() {
        picked.push(candidate.node);
    }
    picked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
