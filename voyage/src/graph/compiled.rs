//! Compiled state graph: immutable, runs a state from the entry node to END.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Executable graph produced by [`StateGraph::compile`](super::StateGraph::compile).
///
/// After each node the successor is taken from the conditional router when the node has one;
/// otherwise from the node's [`Next`]: `Continue` follows the outgoing edge, `Node(id)` jumps,
/// `End` stops. Reaching END, or a node without an outgoing edge, ends the run.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs the graph to completion and returns the final state.
    ///
    /// The first node error aborts the run; nothing is retried.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut state = state;
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;
        log_graph_start(&current_id);

        loop {
            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("unknown node: {}", current_id))
            })?;

            log_node_start(&current_id);
            let (new_state, next) = match node.run(state).await {
                Ok(out) => out,
                Err(e) => {
                    log_graph_error(&current_id, &e);
                    return Err(e);
                }
            };
            log_node_complete(&current_id, &next);
            state = new_state;
            steps += 1;

            match self.successor(&current_id, next, &state) {
                Some(id) if id != END => current_id = id,
                _ => {
                    log_graph_complete(steps);
                    return Ok(state);
                }
            }
        }
    }

    fn successor(&self, current_id: &str, next: Next, state: &S) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                tracing::debug!(from = %current_id, to = %target, "conditional routing");
                Some(target)
            }
            Some(NextEntry::Unconditional(to)) => match next {
                Next::Continue => Some(to.clone()),
                Next::Node(id) => Some(id),
                Next::End => None,
            },
            None => match next {
                Next::Node(id) => Some(id),
                Next::Continue | Next::End => None,
            },
        }
    }

    /// Id of the node that runs first.
    pub fn entry(&self) -> &str {
        &self.first_node_id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::AgentError;
    use crate::graph::{Next, Node, StateGraph, END, START};

    #[derive(Clone, Debug, Default)]
    struct Trail(Vec<String>);

    struct Push {
        id: &'static str,
        next: Next,
    }

    impl Push {
        fn new(id: &'static str) -> Arc<Self> {
            Arc::new(Self {
                id,
                next: Next::Continue,
            })
        }
    }

    #[async_trait]
    impl Node<Trail> for Push {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, mut state: Trail) -> Result<(Trail, Next), AgentError> {
            state.0.push(self.id.to_string());
            Ok((state, self.next.clone()))
        }
    }

    struct Fail;

    #[async_trait]
    impl Node<Trail> for Fail {
        fn id(&self) -> &str {
            "fail"
        }
        async fn run(&self, _state: Trail) -> Result<(Trail, Next), AgentError> {
            Err(AgentError::ExecutionFailed("always fails".into()))
        }
    }

    #[tokio::test]
    async fn invoke_follows_linear_chain() {
        let mut graph = StateGraph::<Trail>::new();
        graph
            .add_node("a", Push::new("a"))
            .add_node("b", Push::new("b"))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);
        let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
        assert_eq!(out.0, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn invoke_routes_conditionally_to_end() {
        let mut graph = StateGraph::<Trail>::new();
        graph
            .add_node("a", Push::new("a"))
            .add_node("b", Push::new("b"))
            .add_edge(START, "a")
            .add_edge("b", END)
            .add_conditional_edges(
                "a",
                Arc::new(|s: &Trail| if s.0.len() > 5 { "go".to_string() } else { "stop".to_string() }),
                Some(
                    [("go".to_string(), "b".to_string()), ("stop".to_string(), END.to_string())]
                        .into_iter()
                        .collect(),
                ),
            );
        let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
        assert_eq!(out.0, vec!["a"]);
    }

    #[tokio::test]
    async fn node_end_stops_before_edge() {
        let mut graph = StateGraph::<Trail>::new();
        graph
            .add_node(
                "a",
                Arc::new(Push {
                    id: "a",
                    next: Next::End,
                }),
            )
            .add_node("b", Push::new("b"))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);
        let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
        assert_eq!(out.0, vec!["a"]);
    }

    #[tokio::test]
    async fn node_error_propagates() {
        let mut graph = StateGraph::<Trail>::new();
        graph
            .add_node("fail", Arc::new(Fail))
            .add_edge(START, "fail")
            .add_edge("fail", END);
        let err = graph
            .compile()
            .unwrap()
            .invoke(Trail::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("always fails"));
    }
}
