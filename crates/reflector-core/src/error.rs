//! Error types for reflector-rs.

use thiserror::Error;

/// The main error type for reflector-rs operations.
#[derive(Error, Debug)]
pub enum ReflectorError {
    /// A plane was requested with a zero-length or non-finite normal.
    #[error("degenerate plane: normal {0:?} cannot be normalized")]
    DegeneratePlane(glam::Vec3),

    /// A scene node with the given id does not exist.
    #[error("scene node {0} not found")]
    NodeNotFound(u32),

    /// A scene node was used in a role its capability tag does not allow.
    #[error("scene node {id} is tagged {actual}, expected {expected}")]
    WrongNodeTag {
        id: u32,
        expected: &'static str,
        actual: &'static str,
    },

    /// Mesh geometry referenced a vertex that does not exist.
    #[error("mesh index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A configuration value was rejected by validation.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for reflector-rs operations.
pub type Result<T> = std::result::Result<T, ReflectorError>;
