//! Error types for MatchForge

use thiserror::Error;

/// Main error type for MatchForge operations
#[derive(Debug, Error)]
pub enum MatchForgeError {
    /// A score buffer's length does not match its declared rank and extent
    #[error("shape mismatch for target {target}: expected {expected} cells, got {actual}")]
    ShapeMismatch {
        target: usize,
        expected: usize,
        actual: usize,
    },

    /// A flat buffer cannot represent a cube of the declared rank and extent
    #[error("tensor buffer length {actual} does not match extent^rank = {expected}")]
    TensorShape { expected: usize, actual: usize },

    /// A tensor's rank disagrees with the arity declared for its target
    #[error("arity mismatch for target {target}: catalog declares {declared}, tensor has rank {actual}")]
    ArityMismatch {
        target: usize,
        declared: usize,
        actual: usize,
    },

    /// Tensors within one event disagree about the candidate extent
    #[error("extent mismatch for target {target}: expected {expected} candidates per axis, got {actual}")]
    ExtentMismatch {
        target: usize,
        expected: usize,
        actual: usize,
    },

    /// Error in target catalog definition
    #[error("invalid target catalog: {0}")]
    Catalog(String),

    /// Candidate extent must allow at least one candidate per axis
    #[error("candidate extent must be at least 1")]
    InvalidExtent,

    /// Error in engine configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Number of provided tensors does not match the catalog
    #[error("expected {expected} score tensors (one per target), got {actual}")]
    TargetCountMismatch { expected: usize, actual: usize },
}

/// Result type alias for MatchForge operations
pub type Result<T> = std::result::Result<T, MatchForgeError>;
