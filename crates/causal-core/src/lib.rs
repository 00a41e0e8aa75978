//! Core types and traits for causal effect estimation
//!
//! This crate provides the shared vocabulary of the causal-effects
//! workspace: the validated [`Dataset`] column store, the
//! [`EffectVector`] of per-level expected outcomes, the
//! [`EffectMeasure`] contrasts between them, the [`EffectEstimator`]
//! seam implemented by the estimation strategies, and the unified
//! [`Error`] type every crate reports through.
//!
//! # Overview
//!
//! Estimating E[Y | do(A=a)] from observational data always moves
//! through the same shapes regardless of strategy: records go in, one
//! expected outcome per treatment level comes out, and a contrast
//! (difference or ratio) summarizes the pair. Keeping those shapes in
//! one dependency-light crate lets the transform, model, estimator,
//! and bootstrap layers evolve independently.
//!
//! # Examples
//!
//! ```rust
//! use causal_core::{Dataset, EffectMeasure, EffectVector};
//!
//! let data = Dataset::new(
//!     vec![1.0, 0.0, 1.0, 1.0],      // outcome
//!     vec![0, 0, 1, 1],              // treatment
//!     vec![vec![0.2, 1.4, 0.7, 2.1]], // one covariate column
//! ).unwrap();
//! assert_eq!(data.len(), 4);
//!
//! let effects = EffectVector::new(0.25, 0.75);
//! assert_eq!(EffectMeasure::Difference.apply(&effects).unwrap(), 0.5);
//! ```

mod dataset;
mod effect;
mod error;
mod traits;

// Re-exports
pub use dataset::{Dataset, TREATMENT_LEVELS};
pub use effect::{EffectMeasure, EffectVector};
pub use error::{Error, Result};
pub use traits::EffectEstimator;

/// Version of the causal-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for working with causal estimates
pub mod prelude {
    pub use crate::dataset::{Dataset, TREATMENT_LEVELS};
    pub use crate::effect::{EffectMeasure, EffectVector};
    pub use crate::error::{Error, Result};
    pub use crate::traits::EffectEstimator;
}
