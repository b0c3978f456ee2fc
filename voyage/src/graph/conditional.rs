//! Conditional edges: route to the next node based on state.
//!
//! The router returns a key; with a path map the key is translated to a node id (or END),
//! without one the key is used as the node id directly.

use std::collections::HashMap;
use std::sync::Arc;

/// Router function: reads the state after the source node ran and returns a routing key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Routing function plus optional key → node id map.
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Node id (or END) to run after the source node. Keys absent from the map pass through.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        self.path_map
            .as_ref()
            .and_then(|m| m.get(&key))
            .cloned()
            .unwrap_or(key)
    }

    /// Every target this router can name through its map. Empty when there is no map.
    pub(super) fn targets(&self) -> impl Iterator<Item = &String> {
        self.path_map.iter().flat_map(|m| m.values())
    }
}

/// How the compiled graph picks the successor of a node.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Fixed successor (or END). The node's own `Next` still applies.
    Unconditional(String),
    /// Successor decided by the router from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}
