//! Graph compilation error.

use thiserror::Error;

/// Returned by `StateGraph::compile` when the wiring is invalid.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id used by an edge was never registered with `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Nothing ever reaches END.
    #[error("graph must have at least one path to END")]
    MissingEnd,

    /// Branching plain edges or a cycle in a graph without conditional edges.
    #[error("edges must form a single linear chain from START to END: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A path map value is neither a registered node nor END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}
