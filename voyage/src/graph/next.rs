//! What a node asks the runner to do after it returns.

/// Next step after running a node.
///
/// Ignored for nodes that have conditional edges; the router decides there.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the node's outgoing edge (END if it has none).
    Continue,
    /// Run the node with the given id next.
    Node(String),
    /// Stop and return the current state.
    End,
}
