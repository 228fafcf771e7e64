//! Directed adjacency-list graph.
//!
//! # Overview
//!
//! The graph is a mapping from integer node ids to ordered neighbor lists,
//! exactly as stored in the JSON input format: directed, duplicate edges and
//! self-loops permitted, neighbor order preserved. It is read-only after
//! construction for the duration of a selection run.
//!
//! ## Iteration order
//!
//! [`AdjacencyGraph::nodes`] yields node ids in ascending order. Every
//! consumer that feeds candidates into a ranking structure iterates the graph
//! through this method, so score ties resolve to the smaller node id and
//! runs over the same graph are reproducible.
//!
//! ## Dangling references
//!
//! A neighbor id that never appears as a key has no adjacency entry of its
//! own; [`AdjacencyGraph::neighbors`] returns the empty slice for it. Such
//! ids are not part of [`AdjacencyGraph::nodes`].

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::error::GraphError;

/// Integer node identifier, as found in the JSON input.
pub type NodeId = u64;

/// A directed graph stored as an adjacency list.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    /// Node id → ordered neighbor list (duplicates preserved).
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    /// All node ids, ascending.
    ids: Vec<NodeId>,
}

impl AdjacencyGraph {
    /// Build a graph from an already-parsed adjacency map.
    #[must_use]
    pub fn from_adjacency(adjacency: HashMap<NodeId, Vec<NodeId>>) -> Self {
        let mut ids: Vec<NodeId> = adjacency.keys().copied().collect();
        ids.sort_unstable();
        Self { adjacency, ids }
    }

    /// Parse a graph from its JSON adjacency-list representation.
    ///
    /// The expected shape is an object whose keys are decimal node ids and
    /// whose values are arrays of node ids: `{"1": [2, 3], "2": []}`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Malformed`] if the input is not an object of
    /// integer arrays, or [`GraphError::InvalidNodeId`] if an object key is
    /// not a non-negative integer.
    #[instrument(skip(input))]
    pub fn from_json_str(input: &str) -> Result<Self, GraphError> {
        let raw: HashMap<String, Vec<NodeId>> = serde_json::from_str(input)?;

        let mut adjacency = HashMap::with_capacity(raw.len());
        for (key, neighbors) in raw {
            let node: NodeId = key
                .parse()
                .map_err(|_| GraphError::InvalidNodeId { key: key.clone() })?;
            adjacency.insert(node, neighbors);
        }

        let graph = Self::from_adjacency(adjacency);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed adjacency list"
        );
        Ok(graph)
    }

    /// All node ids in ascending order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.ids
    }

    /// The ordered neighbor list of `node` (empty for unknown ids).
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Raw out-degree of `node`: the neighbor-list length, duplicates counted.
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Whether `node` has an adjacency entry.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of edges, duplicates counted.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Build a deduplicated `petgraph` view of the graph.
    ///
    /// Node weights are the original node ids. Neighbor-only ids (dangling
    /// references) become nodes too, so traversals never fall off the graph.
    /// Parallel edges are collapsed: shortest-path based centrality metrics
    /// are unaffected by edge multiplicity.
    #[must_use]
    pub fn to_digraph(&self) -> DiGraph<NodeId, ()> {
        let mut graph = DiGraph::<NodeId, ()>::new();
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::with_capacity(self.ids.len());

        for &id in &self.ids {
            let idx = graph.add_node(id);
            index.insert(id, idx);
        }

        for &id in &self.ids {
            let from = index[&id];
            for &neighbor in self.neighbors(id) {
                let to = *index
                    .entry(neighbor)
                    .or_insert_with(|| graph.add_node(neighbor));
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        graph
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(entries: &[(NodeId, &[NodeId])]) -> AdjacencyGraph {
        AdjacencyGraph::from_adjacency(
            entries
                .iter()
                .map(|(node, neighbors)| (*node, neighbors.to_vec()))
                .collect(),
        )
    }

    #[test]
    fn parses_valid_adjacency_list() {
        let g = AdjacencyGraph::from_json_str(r#"{"1": [2, 3], "2": [1], "3": []}"#)
            .expect("valid input");
        assert_eq!(g.nodes(), &[1, 2, 3]);
        assert_eq!(g.neighbors(1), &[2, 3]);
        assert_eq!(g.neighbors(3), &[] as &[NodeId]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn rejects_non_integer_key() {
        let err = AdjacencyGraph::from_json_str(r#"{"alpha": [1]}"#).unwrap_err();
        assert!(matches!(err, GraphError::InvalidNodeId { .. }));
    }

    #[test]
    fn rejects_negative_neighbor() {
        let err = AdjacencyGraph::from_json_str(r#"{"1": [-2]}"#).unwrap_err();
        assert!(matches!(err, GraphError::Malformed(_)));
    }

    #[test]
    fn rejects_non_object_input() {
        let err = AdjacencyGraph::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, GraphError::Malformed(_)));
    }

    #[test]
    fn empty_object_is_an_empty_graph() {
        let g = AdjacencyGraph::from_json_str("{}").expect("valid input");
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.nodes().is_empty());
    }

    #[test]
    fn nodes_are_sorted_numerically_not_lexically() {
        // JSON object keys are strings; "10" sorts before "2" lexically.
        let g = AdjacencyGraph::from_json_str(r#"{"10": [], "2": [], "1": []}"#)
            .expect("valid input");
        assert_eq!(g.nodes(), &[1, 2, 10]);
    }

    #[test]
    fn duplicate_edges_and_self_loops_are_preserved() {
        let g = graph(&[(1, &[2, 2, 1]), (2, &[])]);
        assert_eq!(g.neighbors(1), &[2, 2, 1]);
        assert_eq!(g.out_degree(1), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let g = graph(&[(1, &[2])]);
        assert_eq!(g.neighbors(99), &[] as &[NodeId]);
        assert_eq!(g.out_degree(99), 0);
        assert!(!g.contains(99));
    }

    #[test]
    fn digraph_view_deduplicates_edges() {
        let g = graph(&[(1, &[2, 2, 2]), (2, &[1])]);
        let dg = g.to_digraph();
        assert_eq!(dg.node_count(), 2);
        assert_eq!(dg.edge_count(), 2);
    }

    #[test]
    fn digraph_view_includes_dangling_neighbors() {
        // 7 never appears as a key but must exist as a traversal target.
        let g = graph(&[(1, &[7])]);
        let dg = g.to_digraph();
        assert_eq!(dg.node_count(), 2);
        assert_eq!(dg.edge_count(), 1);
    }
}
