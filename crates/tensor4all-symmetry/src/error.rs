//! Error types for symmetric block computations.

use thiserror::Error;

/// Error type for charge fusion and block finding.
///
/// Empty outcomes (no conserving elements, no surviving blocks) are never
/// errors; they are returned as empty collections.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymmetryError {
    /// A balanced partition needs at least two dimensions.
    #[error("expecting `dims` with a length of at least 2, got {len}")]
    TooFewDimensions { len: usize },

    /// The operation needs at least one leg.
    #[error("at least one charge array is required")]
    EmptyCharges,

    /// Every charge array needs exactly one flow.
    #[error("number of charge arrays ({charges}) != number of flows ({flows})")]
    FlowCountMismatch { charges: usize, flows: usize },

    /// Every leg needs exactly one stride.
    #[error("number of strides ({strides}) != number of legs ({legs})")]
    StrideCountMismatch { strides: usize, legs: usize },

    /// Row/column split point beyond the last leg.
    #[error("partition {partition} out of range for a tensor with {num_legs} legs")]
    PartitionOutOfRange { partition: usize, num_legs: usize },
}

/// Result type for symmetric block computations.
pub type Result<T> = std::result::Result<T, SymmetryError>;
