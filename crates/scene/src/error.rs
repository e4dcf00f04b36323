//! Scene graph error types.

use thiserror::Error;

use crate::NodeId;

/// Errors raised by scene graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// The child already has a parent and must be detached first.
    #[error("{child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    /// The graph root can never become a child.
    #[error("the scene root cannot be attached to another node")]
    RootAttach,

    /// The graph root lives as long as the graph.
    #[error("the scene root cannot be destroyed")]
    RootDestroy,

    /// No node in the scene tree carries this name.
    #[error("no node named {0:?}")]
    NotFound(String),

    /// The handle refers to a node that has been destroyed.
    #[error("{0} no longer exists")]
    StaleReference(NodeId),

    /// Every `u32` node id has been handed out.
    #[error("the scene graph cannot hold more than {} nodes", u64::from(u32::MAX) + 1)]
    CapacityExceeded,

    /// The light kind has no shadow support.
    #[error("{0} lights cannot cast shadows")]
    ShadowUnsupported(&'static str),
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
