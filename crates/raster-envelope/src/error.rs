//! Error types for envelope operations.

use thiserror::Error;

/// Errors that can occur when constructing or combining envelopes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvelopeError {
    /// The corner coordinates do not form a valid envelope.
    #[error("invalid envelope shape: ({x_min}, {y_min}, {x_max}, {y_max})")]
    InvalidEnvelope {
        x_min: f64,
        y_min: f64,
        x_max: f64,
        y_max: f64,
    },

    /// The cell size is zero, negative, or not finite.
    #[error("invalid cell size: {0} (must be finite and positive)")]
    InvalidCellSize(f64),

    /// A coordinate range or cell size cannot be represented exactly for
    /// the decimal cell-count computation.
    #[error("value {0} is outside the representable decimal range")]
    CoordinateOverflow(f64),

    /// An operation that requires overlap was given non-overlapping envelopes.
    #[error("envelopes do not overlap")]
    DisjointEnvelopes,

    /// A reducer was given an empty sequence of envelopes.
    #[error("cannot reduce an empty sequence of envelopes")]
    EmptySequence,
}

/// Result type alias for envelope operations.
pub type Result<T> = std::result::Result<T, EnvelopeError>;
