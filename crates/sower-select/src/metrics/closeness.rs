//! Closeness centrality via per-node BFS.
//!
//! # Overview
//!
//! A node's closeness is the reciprocal of its average shortest-path
//! distance to the nodes it can reach along outgoing edges:
//!
//! ```text
//! closeness(u) = r / Σ d(u, v)
//! ```
//!
//! where `r` counts the reachable nodes other than `u` and the sum runs
//! over those nodes. Closeness is undefined for a node that reaches
//! nothing (an isolated node, a pure sink, or a node whose only edge is a
//! self-loop) — such nodes return `None` and are omitted from ranking.

use std::collections::{HashMap, VecDeque};

use sower_core::{AdjacencyGraph, NodeId};

/// Compute closeness centrality for one node, or `None` when undefined.
///
/// Runs a single BFS over the adjacency lists; duplicate edges are
/// harmless (revisited nodes are skipped). Unknown node ids return `None`.
#[must_use]
pub fn closeness_centrality(graph: &AdjacencyGraph, node: NodeId) -> Option<f64> {
    if !graph.contains(node) {
        return None;
    }

    let mut dist: HashMap<NodeId, usize> = HashMap::new();
    dist.insert(node, 0);

    let mut queue: VecDeque<NodeId> = VecDeque::new();
    queue.push_back(node);

    let mut reached = 0usize;
    let mut total_distance = 0usize;

    while let Some(current) = queue.pop_front() {
        let next_distance = dist[&current] + 1;
        for &neighbor in graph.neighbors(current) {
            if dist.contains_key(&neighbor) {
                continue;
            }
            dist.insert(neighbor, next_distance);
            queue.push_back(neighbor);
            reached += 1;
            total_distance += next_distance;
        }
    }

    if reached == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let score = reached as f64 / total_distance as f64;
    Some(score)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
