//! Node and turn execution errors.
//!
//! Returned by `Node::run`, `LlmClient::invoke` and the compiled graph. Search failures
//! never show up here: the search adapter turns them into sentinel text.

use thiserror::Error;

/// Error raised while running a graph node.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. model endpoint unreachable, API error).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The model answered, but not with the structured output the node asked for.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}
