//! Errors raised while ingesting a graph.

/// Errors from adjacency-list parsing.
///
/// Ingestion errors are fatal: they are surfaced to the caller before any
/// selection runs, so the selection engine only ever sees a valid graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node key in the adjacency object was not a non-negative integer.
    #[error("invalid node id {key:?}: node ids must be non-negative integers")]
    InvalidNodeId {
        /// The offending JSON object key, verbatim.
        key: String,
    },

    /// The input was not a JSON object of integer arrays.
    #[error("malformed adjacency list: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::GraphError;

    #[test]
    fn invalid_node_id_names_the_key() {
        let err = GraphError::InvalidNodeId {
            key: "alpha".to_string(),
        };
        assert!(err.to_string().contains("\"alpha\""));
    }
}
