use thiserror::Error;

use crate::id::NodeId;

/// Errors returned by element tree mutations.
///
/// Layout itself never fails; malformed nodes are skipped during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle does not refer to a live node
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),
    /// A node cannot be its own parent
    #[error("node {0:?} cannot be parented to itself")]
    SelfParent(NodeId),
    /// The new parent is a descendant of the child
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected { child: NodeId, parent: NodeId },
}
