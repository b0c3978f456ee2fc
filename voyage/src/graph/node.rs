//! Graph node trait: one step in a [`StateGraph`](super::StateGraph).

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// Nodes receive the whole state by value and return the whole updated state; there is no
/// partial-update merge. Errors abort the run and propagate out of `invoke`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"analyzer"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// Runs the step.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
