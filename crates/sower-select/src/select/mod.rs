//! Cross-metric seed-selection orchestration.
//!
//! # Overview
//!
//! A selection run walks the fixed metric sequence in [`Metric::ORDER`].
//! Each active metric ranks the nodes not yet claimed by an earlier metric
//! and claims its own picks, shrinking the eligible pool for the metrics
//! after it. With a nonzero entropy the orchestrator asks every metric to
//! over-provision by `(1 + entropy)` and afterwards draws the requested
//! quota uniformly at random from each metric's pool.
//!
//! Over-provisioned picks stay claimed for later metrics even when the
//! final truncation drops them: exclusivity is decided while the metrics
//! run, not after shuffling.

pub mod centrality;
pub mod discount;
pub mod iterated;

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sower_core::{AdjacencyGraph, NodeId};
use tracing::{debug, instrument};

use crate::metrics::ExactCentrality;
use crate::select::centrality::CentralityProvider;

/// Default traversal depth for the iterated-degree metric.
pub const DEFAULT_GENERATIONS: usize = 3;

/// A centrality/influence metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Betweenness centrality (external provider).
    Between,
    /// Closeness centrality (external provider).
    Close,
    /// Plain out-degree (iterated degree at depth 1).
    Degree,
    /// Degree-discount heuristic.
    Discount,
    /// Bounded-depth iterated degree.
    Iterated,
}

impl Metric {
    /// Processing priority: earlier metrics claim nodes first.
    pub const ORDER: [Self; 5] = [
        Self::Between,
        Self::Close,
        Self::Degree,
        Self::Discount,
        Self::Iterated,
    ];

    /// The metric's label, as used on the CLI and in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Between => "between",
            Self::Close => "close",
            Self::Degree => "degree",
            Self::Discount => "discount",
            Self::Iterated => "iterated",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from selection-request validation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The iterated-degree depth must be at least one generation.
    #[error("generations must be at least 1 (got {0})")]
    InvalidGenerations(usize),
    /// The entropy slack must be a finite non-negative factor.
    #[error("entropy must be finite and >= 0 (got {0})")]
    InvalidEntropy(f64),
}

/// Per-run selection parameters.
///
/// Quota 0 means "metric inactive". `generations` only affects the
/// iterated metric; `entropy` affects every active metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Seeds to select by betweenness centrality.
    pub between: usize,
    /// Seeds to select by closeness centrality.
    pub close: usize,
    /// Seeds to select by maximum out-degree.
    pub degree: usize,
    /// Seeds to select with the degree-discount heuristic.
    pub discount: usize,
    /// Seeds to select by maximum iterated degree.
    pub iterated: usize,
    /// Traversal depth for the iterated-degree metric (≥ 1).
    pub generations: usize,
    /// Randomization slack: each metric over-provisions by `(1 + entropy)`
    /// and the final quota is drawn uniformly from that pool.
    pub entropy: f64,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            between: 0,
            close: 0,
            degree: 0,
            discount: 0,
            iterated: 0,
            generations: DEFAULT_GENERATIONS,
            entropy: 0.0,
        }
    }
}

impl SelectionRequest {
    /// Check the request's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when `generations` is zero or `entropy` is
    /// negative, infinite, or NaN.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.generations == 0 {
            return Err(RequestError::InvalidGenerations(self.generations));
        }
        if !self.entropy.is_finite() || self.entropy < 0.0 {
            return Err(RequestError::InvalidEntropy(self.entropy));
        }
        Ok(())
    }

    /// The requested quota for `metric`.
    #[must_use]
    pub const fn quota(&self, metric: Metric) -> usize {
        match metric {
            Metric::Between => self.between,
            Metric::Close => self.close,
            Metric::Degree => self.degree,
            Metric::Discount => self.discount,
            Metric::Iterated => self.iterated,
        }
    }

    /// The quota inflated by the entropy slack.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn effective_quota(&self, metric: Metric) -> usize {
        let quota = self.quota(metric);
        if quota == 0 || self.entropy <= 0.0 {
            return quota;
        }
        ((quota as f64) * (1.0 + self.entropy)).ceil() as usize
    }
}

/// The outcome of one selection run: per-metric seed blocks in metric order.
///
/// The node sets of different blocks are pairwise disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    blocks: Vec<(Metric, Vec<NodeId>)>,
}

impl Selection {
    /// The per-metric blocks, in metric priority order (active metrics only).
    #[must_use]
    pub fn blocks(&self) -> &[(Metric, Vec<NodeId>)] {
        &self.blocks
    }

    /// The seeds chosen for one metric (empty if the metric was inactive).
    #[must_use]
    pub fn block(&self, metric: Metric) -> &[NodeId] {
        self.blocks
            .iter()
            .find(|(m, _)| *m == metric)
            .map_or(&[], |(_, nodes)| nodes.as_slice())
    }

    /// All chosen seeds, concatenated in metric order.
    #[must_use]
    pub fn seeds(&self) -> Vec<NodeId> {
        self.blocks
            .iter()
            .flat_map(|(_, nodes)| nodes.iter().copied())
            .collect()
    }

    /// Total number of chosen seeds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|(_, nodes)| nodes.len()).sum()
    }

    /// Whether no seeds were chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orchestrates the metric sequence over one graph.
#[derive(Debug)]
pub struct SeedSelector<'g, P = ExactCentrality> {
    graph: &'g AdjacencyGraph,
    request: SelectionRequest,
    provider: P,
}

impl<'g> SeedSelector<'g, ExactCentrality> {
    /// Build a selector with the default exact centrality provider.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the request fails validation.
    pub fn new(
        graph: &'g AdjacencyGraph,
        request: SelectionRequest,
    ) -> Result<Self, RequestError> {
        Self::with_provider(graph, request, ExactCentrality)
    }
}

impl<'g, P: CentralityProvider> SeedSelector<'g, P> {
    /// Build a selector with a caller-supplied centrality provider.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the request fails validation.
    pub fn with_provider(
        graph: &'g AdjacencyGraph,
        request: SelectionRequest,
        provider: P,
    ) -> Result<Self, RequestError> {
        request.validate()?;
        Ok(Self {
            graph,
            request,
            provider,
        })
    }

    /// Run the selection with an OS-seeded random source.
    ///
    /// With entropy 0 the result is fully deterministic and the random
    /// source is never consulted; use [`Self::choose_with_rng`] to make
    /// entropy runs reproducible.
    #[must_use]
    pub fn choose(&self) -> Selection {
        self.choose_with_rng(&mut StdRng::from_entropy())
    }

    /// Run the selection with a caller-supplied random source.
    #[must_use]
    #[instrument(skip_all, fields(entropy = self.request.entropy))]
    pub fn choose_with_rng(&self, rng: &mut impl Rng) -> Selection {
        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut blocks: Vec<(Metric, Vec<NodeId>)> = Vec::new();

        for metric in Metric::ORDER {
            let quota = self.request.quota(metric);
            if quota == 0 {
                continue;
            }
            let goal = self.request.effective_quota(metric);
            let picked = match metric {
                Metric::Between => centrality::betweenness_seeds(
                    &self.provider,
                    self.graph,
                    &claimed,
                    goal,
                ),
                Metric::Close => {
                    centrality::closeness_seeds(&self.provider, self.graph, &claimed, goal)
                }
                Metric::Degree => {
                    iterated::iterated_degree_seeds(self.graph, &claimed, goal, 1)
                }
                Metric::Discount => {
                    discount::degree_discount_seeds(self.graph, &claimed, goal)
                }
                Metric::Iterated => iterated::iterated_degree_seeds(
                    self.graph,
                    &claimed,
                    goal,
                    self.request.generations,
                ),
            };
            debug!(
                metric = %metric,
                quota,
                goal,
                picked = picked.len(),
                "metric selection complete"
            );
            claimed.extend(picked.iter().copied());
            blocks.push((metric, picked));
        }

        if self.request.entropy > 0.0 {
            for (metric, block) in &mut blocks {
                block.shuffle(rng);
                block.truncate(self.request.quota(*metric));
            }
        }

        Selection { blocks }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
