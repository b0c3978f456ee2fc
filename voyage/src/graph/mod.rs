//! State graph: nodes, explicit edges and conditional edges; compile, then invoke.
//!
//! One state type `S` flows through every node. A node returns the full updated state and a
//! [`Next`]; nodes with conditional edges are routed by a function of the state instead.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
