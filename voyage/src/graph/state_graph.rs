//! State graph builder: nodes + explicit edges (from → to) and optional conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using [`START`] and [`END`]
//! for entry and exit, and use `add_conditional_edges` where the successor depends on state.
//! A node has either one outgoing `add_edge` or conditional edges, never both.
//!
//! ```rust,ignore
//! let mut graph = StateGraph::<TravelState>::new();
//! graph
//!     .add_node("analyzer", analyzer)
//!     .add_node("researcher", researcher)
//!     .add_node("architect", architect)
//!     .add_edge(START, "analyzer")
//!     .add_conditional_edges("analyzer", router, Some(path_map))
//!     .add_edge("researcher", "architect")
//!     .add_edge("architect", END);
//! let compiled = graph.compile()?;
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compile_error::CompilationError;
use super::compiled::CompiledStateGraph;
use super::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use super::node::Node;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)` or as a path map target.
pub const END: &str = "__end__";

/// Mutable graph under construction. Generic over the state type `S`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
        }
    }

    /// Registers a node under `id`, replacing any node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a plain edge. Ids other than START/END must be registered before `compile`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Routes out of `source` with `path(state)`, optionally translated through `path_map`.
    ///
    /// The router runs on the state returned by `source`. Map values must be node ids or END.
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Validates the wiring and freezes the graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.check_node_ids()?;
        let first = self.entry_node()?;
        self.check_reaches_end()?;

        let plain_sources: Vec<&String> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, _)| f)
            .collect();
        let unique: HashSet<&String> = plain_sources.iter().copied().collect();
        if unique.len() != plain_sources.len() {
            return Err(CompilationError::InvalidChain("duplicate from (branch)".into()));
        }
        if let Some(source) = self.conditional_edges.keys().find(|s| unique.contains(s)) {
            return Err(CompilationError::NodeHasBothEdgeAndConditional(source.clone()));
        }
        if self.conditional_edges.is_empty() {
            self.check_linear_chain(&first)?;
        }

        let mut next_map: HashMap<String, NextEntry<S>> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f.clone(), NextEntry::Unconditional(t.clone())))
            .collect();
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
        })
    }

    fn check_node_ids(&self) -> Result<(), CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if let Some(target) = router
                .targets()
                .find(|t| t.as_str() != END && !self.nodes.contains_key(t.as_str()))
            {
                return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
            }
        }
        Ok(())
    }

    fn entry_node(&self) -> Result<String, CompilationError> {
        let mut starts = self.edges.iter().filter(|(f, _)| f == START).map(|(_, t)| t);
        match (starts.next(), starts.next()) {
            (None, _) => Err(CompilationError::MissingStart),
            (Some(first), None) => Ok(first.clone()),
            (Some(_), Some(_)) => Err(CompilationError::InvalidChain(
                "multiple edges from START (branch)".into(),
            )),
        }
    }

    /// A router without a path map may return END at runtime, so it counts as reaching END.
    fn check_reaches_end(&self) -> Result<(), CompilationError> {
        let plain = self.edges.iter().any(|(_, t)| t == END);
        let conditional = self.conditional_edges.values().any(|r| {
            r.path_map
                .as_ref()
                .map_or(true, |m| m.values().any(|v| v == END))
        });
        if plain || conditional {
            Ok(())
        } else {
            Err(CompilationError::MissingEnd)
        }
    }

    fn check_linear_chain(&self, first: &str) -> Result<(), CompilationError> {
        let successor: HashMap<&str, &str> = self
            .edges
            .iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f.as_str(), t.as_str()))
            .collect();
        let mut visited = HashSet::from([first]);
        let mut current = first;
        while let Some(&next) = successor.get(current) {
            if next == END {
                break;
            }
            if !visited.insert(next) {
                return Err(CompilationError::InvalidChain("cycle detected".into()));
            }
            current = next;
        }
        Ok(())
    }
}
