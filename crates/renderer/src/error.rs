//! Renderer and render loop error types.

use thiserror::Error;

/// Failure reported by a [`Renderer`](crate::Renderer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The rendering context is gone (e.g. device or context loss)
    #[error("Rendering context lost: {0}")]
    ContextLost(String),

    /// Any other backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Error type for render loop operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoopError {
    /// `tick` was called while the loop is stopped.
    #[error("Render loop is not running")]
    NotRunning,

    /// The loop already ran and stopped; it does not restart.
    #[error("Render loop has terminated")]
    Terminated,

    /// The renderer failed; the loop stopped.
    #[error("Renderer failed: {0}")]
    Renderer(#[from] RenderError),
}
