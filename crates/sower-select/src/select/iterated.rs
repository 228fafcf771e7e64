//! Iterated-degree seed selection.
//!
//! # Overview
//!
//! A node's iterated degree at depth `d` is the number of node occurrences
//! reached by expanding its out-edges for `d` generations. Occurrences are
//! counted per path: a node reachable two ways counts twice, revisits and
//! self-loops are not deduplicated. Skipping the visited-set bookkeeping
//! keeps the expansion cheap and intentionally approximates multi-hop
//! influence reach. Depth 1 is plain out-degree.

use std::collections::HashSet;

use sower_core::{AdjacencyGraph, NodeId};
use tracing::instrument;

use crate::topk::BoundedTopK;

/// Select up to `quota` seeds by maximum iterated degree at `generations`.
///
/// Nodes in `excluded` are ineligible. `generations` must be at least 1;
/// depth 0 expands nothing and selects nothing. Returns fewer than `quota`
/// nodes when the eligible pool is smaller, without error.
#[must_use]
#[instrument(skip(graph, excluded), fields(eligible = graph.node_count().saturating_sub(excluded.len())))]
pub fn iterated_degree_seeds(
    graph: &AdjacencyGraph,
    excluded: &HashSet<NodeId>,
    quota: usize,
    generations: usize,
) -> Vec<NodeId> {
    if quota == 0 || generations == 0 {
        return Vec::new();
    }

    let mut topk = BoundedTopK::new(quota);
    for &node in graph.nodes() {
        if excluded.contains(&node) {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        topk.insert(descendant_count(graph, node, generations) as f64, node);
    }

    let mut picked = Vec::with_capacity(topk.len());
    while let Some(candidate) = topk.pop_max() {
        picked.push(candidate.node);
    }
    picked
}

/// Count node occurrences across generations `1..=generations` from `root`.
fn descendant_count(graph: &AdjacencyGraph, root: NodeId, generations: usize) -> usize {
    let mut frontier: Vec<NodeId> = vec![root];
    let mut total = 0;
    for _ in 0..generations {
        let next: Vec<NodeId> = frontier
            .iter()
            .flat_map(|&node| graph.neighbors(node).iter().copied())
            .collect();
        total += next.len();
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    total
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
