//! Degree-discount seed selection.
//!
//! # Overview
//!
//! The heuristic picks locally highest-impact nodes one at a time. After
//! each pick, every still-eligible neighbor of the picked node has its
//! effective score reduced (discounted): a node whose neighborhood is
//! already saturated with seeds contributes less fresh influence.
//!
//! With `d` a node's raw out-degree, `t` its count of already-seeded
//! neighbors, and `p` the influence probability, the discounted score is
//!
//! ```text
//! d - 2t - (d - t) * t * p
//! ```
//!
//! # Candidate pool
//!
//! Candidates are pre-ranked by raw out-degree through a [`BoundedTopK`]
//! of capacity `ceil(quota * DISCOUNT_POOL_MULTIPLIER)`. Raw-degree order
//! may not match post-discount order, so the pool over-provisions;
//! neighbors outside the pool are silently skipped during discounting.

use std::collections::{HashMap, HashSet};

use sower_core::{AdjacencyGraph, NodeId};
use tracing::instrument;

use crate::topk::BoundedTopK;

/// Over-provisioning factor for the pre-ranked candidate pool.
pub const DISCOUNT_POOL_MULTIPLIER: f64 = 2.0;

/// Probability that a seed activates a given neighbor.
const INFLUENCE_PROBABILITY: f64 = 0.01;

/// Select up to `quota` seeds by iterative degree discounting.
///
/// Nodes in `excluded` are ineligible and also count toward their
/// neighbors' initial seed counts. Returns fewer than `quota` nodes when
/// the eligible pool is smaller, without error.
#[must_use]
#[instrument(skip(graph, excluded), fields(eligible = graph.node_count().saturating_sub(excluded.len())))]
pub fn degree_discount_seeds(
    graph: &AdjacencyGraph,
    excluded: &HashSet<NodeId>,
    quota: usize,
) -> Vec<NodeId> {
    if quota == 0 {
        return Vec::new();
    }

    let mut topk = BoundedTopK::new(pool_capacity(quota));
    for &node in graph.nodes() {
        if excluded.contains(&node) {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        topk.insert(graph.out_degree(node) as f64, node);
    }

    // Drain order (descending raw degree, smaller id among ties) doubles as
    // the deterministic argmax scan order below.
    let mut pool_order: Vec<NodeId> = Vec::with_capacity(topk.len());
    let mut discounted: HashMap<NodeId, f64> = HashMap::with_capacity(topk.len());
    let mut neighbor_seeds: HashMap<NodeId, usize> = HashMap::with_capacity(topk.len());
    while let Some(candidate) = topk.pop_max() {
        pool_order.push(candidate.node);
        discounted.insert(candidate.node, candidate.score);
        neighbor_seeds.insert(candidate.node, claimed_neighbor_count(graph, candidate.node, excluded));
    }

    let mut picked = Vec::with_capacity(quota.min(pool_order.len()));
    while picked.len() < quota && !discounted.is_empty() {
        // First-wins linear scan in pool order keeps ties deterministic.
        let mut best: Option<(NodeId, f64)> = None;
        for &node in &pool_order {
            let Some(&score) = discounted.get(&node) else {
                continue;
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((node, score)),
            }
        }
        let Some((best_node, _)) = best else {
            break;
        };

        picked.push(best_node);
        discounted.remove(&best_node);
        neighbor_seeds.remove(&best_node);

        let neighbors: HashSet<NodeId> = graph.neighbors(best_node).iter().copied().collect();
        for neighbor in neighbors {
            // Neighbors outside the candidate pool (or already picked) are skipped.
            let Some(count) = neighbor_seeds.get_mut(&neighbor) else {
                continue;
            };
            *count += 1;
            #[allow(clippy::cast_precision_loss)]
            let t = *count as f64;
            #[allow(clippy::cast_precision_loss)]
            let d = graph.out_degree(neighbor) as f64;
            let score = d - 2.0 * t - (d - t) * t * INFLUENCE_PROBABILITY;
            discounted.insert(neighbor, score);
        }
    }

    picked
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pool_capacity(quota: usize) -> usize {
    ((quota as f64) * DISCOUNT_POOL_MULTIPLIER).ceil() as usize
}

/// Count the distinct neighbors of `node` that are already claimed.
fn claimed_neighbor_count(
    graph: &AdjacencyGraph,
    node: NodeId,
    excluded: &HashSet<NodeId>,
) -> usize {
    let distinct: HashSet<NodeId> = graph.neighbors(node).iter().copied().collect();
    distinct.iter().filter(|n| excluded.contains(n)).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
