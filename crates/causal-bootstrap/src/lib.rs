//! Bootstrap uncertainty for causal effect estimates
//!
//! Point estimates from observational data are only half the answer;
//! this crate supplies the other half. [`Bootstrap`] reruns any
//! [`EffectEstimator`](causal_core::EffectEstimator) over
//! records-with-replacement resamples of the dataset, and the
//! resulting [`ReplicateSet`] turns into per-measure series with
//! percentile or normal-approximation confidence intervals.
//!
//! Runs are reproducible: replicate randomness derives from one
//! master ChaCha seed, recorded in the output, and is unaffected by
//! the optional rayon parallelism behind the `parallel` feature.
//!
//! # Example
//!
//! ```
//! use causal_bootstrap::Bootstrap;
//! use causal_core::{Dataset, EffectMeasure};
//! use causal_estimators::StandardizationEstimator;
//!
//! let outcome = vec![1.0, 2.0, 2.0, 3.0, 2.0, 3.0, 3.0, 4.0];
//! let treatment = vec![0, 0, 0, 0, 1, 1, 1, 1];
//! let covariate = vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];
//! let data = Dataset::new(outcome, treatment, vec![covariate])?;
//!
//! let replicates = Bootstrap::new(StandardizationEstimator::new())
//!     .with_samples(200)
//!     .with_seed(42)
//!     .run(&data)?;
//! let differences = replicates.measures(EffectMeasure::Difference)?;
//! let interval = differences.percentile_interval(0.95)?;
//! assert!(interval.lower <= interval.upper);
//! # Ok::<(), causal_core::Error>(())
//! ```

mod api;
mod measures;
mod resampler;

pub use api::{
    bootstrap_effects, causal_contrast, CausalContrast, DEFAULT_REPLICATES, FAST_REPLICATES,
    HIGH_PRECISION_REPLICATES,
};
pub use measures::{ConfidenceInterval, MeasureSeries};
pub use resampler::{Bootstrap, ReplicateSet};
