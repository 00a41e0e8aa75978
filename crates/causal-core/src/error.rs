//! Error types for causal effect estimation
//!
//! Provides a unified error type for all causal-effects crates.

use thiserror::Error;

/// Core error type for causal estimation operations
#[derive(Error, Debug)]
pub enum Error {
    /// A covariate column with zero variance cannot be rescaled
    #[error("Degenerate column: covariate {index} has zero variance")]
    DegenerateColumn { index: usize },

    /// An assignment probability of zero has no inverse weight
    #[error("Degenerate weight: record {index} has assignment probability {probability}")]
    DegenerateWeight { index: usize, probability: f64 },

    /// A treatment level with no records cannot be estimated
    #[error("Empty treatment group: level {level} has no records")]
    EmptyTreatmentGroup { level: u8 },

    /// Division by zero in an effect measure
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Model fitting failed to produce usable coefficients
    #[error("Model fit failed: {0}")]
    ModelFit(String),

    /// A bootstrap replicate stayed degenerate through its retry budget
    #[error("Replicate {replicate} degenerate after {attempts} attempts: {source}")]
    DegenerateReplicate {
        replicate: usize,
        attempts: usize,
        #[source]
        source: Box<Error>,
    },

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} records, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_context: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }
}
