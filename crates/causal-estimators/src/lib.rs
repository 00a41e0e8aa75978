//! Causal effect estimators for observational data
//!
//! Two estimators target the same estimand, the pair of expected
//! outcomes under each treatment assignment, from opposite sides of
//! the data:
//!
//! - [`IpwEstimator`] models treatment assignment and reweights the
//!   observed outcomes (inverse probability weighting).
//! - [`StandardizationEstimator`] models the outcome and averages
//!   counterfactual predictions (the parametric g-formula).
//!
//! When both modeling choices are adequate the two agree; comparing
//! them is a cheap specification check.
//!
//! # Example
//!
//! ```
//! use causal_core::{Dataset, EffectEstimator};
//! use causal_estimators::StandardizationEstimator;
//!
//! let outcome = vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0];
//! let treatment = vec![0, 0, 0, 1, 1, 1];
//! let covariate = vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
//! let data = Dataset::new(outcome, treatment, vec![covariate])?;
//!
//! let effects = StandardizationEstimator::new().estimate(&data)?;
//! assert!(effects.difference() > 0.0);
//! # Ok::<(), causal_core::Error>(())
//! ```

mod ipw;
mod standardization;

pub use ipw::IpwEstimator;
pub use standardization::StandardizationEstimator;
