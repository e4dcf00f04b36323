//! Error types for resource descriptors.

use thiserror::Error;

/// Error type for resource registration and lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// A geometry descriptor has out-of-range parameters.
    #[error("Invalid {kind} geometry: {message}")]
    InvalidGeometry {
        /// Geometry kind name.
        kind: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A handle does not belong to the registry it was used with.
    #[error("Unknown {kind} handle #{index}")]
    UnknownHandle {
        /// Asset kind name.
        kind: &'static str,
        /// Raw handle index.
        index: u32,
    },
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
