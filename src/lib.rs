//! Causal effect estimation from observational data
//!
//! This crate estimates what a randomized contrast would have shown
//! from data where treatment was not randomized: the expected outcome
//! under treatment for everyone versus under treatment for no one.
//! Two complementary estimators adjust for measured confounding, and
//! a bootstrap layer attaches uncertainty to whichever one is used:
//!
//! - [`IpwEstimator`] reweights records by their inverse probability
//!   of the treatment they actually received.
//! - [`StandardizationEstimator`] fits an outcome model and averages
//!   its counterfactual predictions.
//! - [`Bootstrap`] resamples whole records and reruns either
//!   estimator, yielding percentile or normal confidence intervals
//!   for the causal difference and ratio.
//!
//! The facade re-exports the workspace crates; [`ipw`] and
//! [`standardization`] build default-configured estimators.
//!
//! # Quick start
//!
//! ```
//! use causal_effects::prelude::*;
//!
//! let outcome = vec![1.0, 2.0, 2.0, 3.0, 2.0, 3.0, 3.0, 4.0];
//! let treatment = vec![0, 0, 0, 0, 1, 1, 1, 1];
//! let covariate = vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];
//! let data = Dataset::new(outcome, treatment, vec![covariate])?;
//!
//! // both estimators see the same effect in this cohort
//! let weighted = ipw().estimate(&data)?;
//! let standardized = standardization().estimate(&data)?;
//! assert!((weighted.difference() - 1.0).abs() < 1e-9);
//! assert!((standardized.difference() - 1.0).abs() < 1e-9);
//!
//! // bootstrap the standardized contrast for intervals
//! let contrast = causal_contrast(&data, standardization(), FAST_REPLICATES, Some(42))?;
//! let interval = contrast.difference.percentile_interval(0.95)?;
//! assert!(interval.contains(interval.estimate));
//! # Ok::<(), causal_effects::Error>(())
//! ```

pub use causal_core::{
    Dataset, EffectEstimator, EffectMeasure, EffectVector, Error, Result, TREATMENT_LEVELS,
};

pub use causal_transform::{standardize, PolynomialExpansion};

pub use causal_models::{
    FittedLinearModel, FittedLogisticModel, LinearRegression, LogisticRegression, Penalty, Solver,
};

pub use causal_estimators::{IpwEstimator, StandardizationEstimator};

pub use causal_bootstrap::{
    bootstrap_effects, causal_contrast, Bootstrap, CausalContrast, ConfidenceInterval,
    MeasureSeries, ReplicateSet, DEFAULT_REPLICATES, FAST_REPLICATES, HIGH_PRECISION_REPLICATES,
};

/// Inverse probability weighting with default settings
pub fn ipw() -> IpwEstimator {
    IpwEstimator::new()
}

/// Regression standardization with default settings
pub fn standardization() -> StandardizationEstimator {
    StandardizationEstimator::new()
}

/// Common imports for estimation pipelines
pub mod prelude {
    pub use crate::{ipw, standardization};
    pub use causal_bootstrap::{
        bootstrap_effects, causal_contrast, Bootstrap, DEFAULT_REPLICATES, FAST_REPLICATES,
        HIGH_PRECISION_REPLICATES,
    };
    pub use causal_core::{Dataset, EffectEstimator, EffectMeasure, EffectVector};
    pub use causal_estimators::{IpwEstimator, StandardizationEstimator};
}
