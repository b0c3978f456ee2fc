//! Structured tracing for graph runs.

use crate::error::AgentError;

use super::Next;

pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting node execution");
}

pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id = node_id, ?next, "Node execution complete");
}

pub fn log_graph_start(first_node_id: &str) {
    tracing::info!(first_node_id = first_node_id, "Starting graph execution");
}

pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "Graph execution complete");
}

pub fn log_graph_error(node_id: &str, error: &AgentError) {
    tracing::error!(node_id = node_id, %error, "Graph execution error");
}
