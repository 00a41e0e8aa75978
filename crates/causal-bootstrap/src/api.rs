//! High-level API for bootstrapped causal contrasts
//!
//! Thin wrappers over [`Bootstrap`] for the common one-call cases,
//! plus the replicate-count presets they share.

use crate::measures::MeasureSeries;
use crate::resampler::{Bootstrap, ReplicateSet};
use causal_core::{Dataset, EffectEstimator, EffectMeasure, Error, Result};

/// Default number of bootstrap replicates
pub const DEFAULT_REPLICATES: usize = 1000;

/// Fast number of replicates for quick estimates
pub const FAST_REPLICATES: usize = 200;

/// High-precision number of replicates
pub const HIGH_PRECISION_REPLICATES: usize = 5000;

/// Run a bootstrap with the default standardize-first pipeline
///
/// # Arguments
/// * `data` - Observational records
/// * `estimator` - Any effect estimator
/// * `n_samples` - Number of replicates (e.g. [`DEFAULT_REPLICATES`])
/// * `seed` - Master seed; `None` draws one from entropy and records it
pub fn bootstrap_effects<E>(
    data: &Dataset,
    estimator: E,
    n_samples: usize,
    seed: Option<u64>,
) -> Result<ReplicateSet>
where
    E: EffectEstimator + Sync,
{
    let mut bootstrap = Bootstrap::new(estimator).with_samples(n_samples);
    if let Some(seed) = seed {
        bootstrap = bootstrap.with_seed(seed);
    }
    bootstrap.run(data)
}

/// A bootstrap run summarized as both effect measures
///
/// `ratio` is `None` when the ratio is undefined on the original
/// estimate (a zero control mean); the difference is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalContrast {
    pub effects: ReplicateSet,
    pub difference: MeasureSeries,
    pub ratio: Option<MeasureSeries>,
}

/// Bootstrap an estimator and report difference and ratio together
///
/// # Example
/// ```
/// use causal_bootstrap::{causal_contrast, FAST_REPLICATES};
/// use causal_core::Dataset;
/// use causal_estimators::StandardizationEstimator;
///
/// let outcome = vec![1.0, 2.0, 2.0, 3.0, 2.0, 3.0, 3.0, 4.0];
/// let treatment = vec![0, 0, 0, 0, 1, 1, 1, 1];
/// let covariate = vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];
/// let data = Dataset::new(outcome, treatment, vec![covariate])?;
///
/// let contrast = causal_contrast(
///     &data,
///     StandardizationEstimator::new(),
///     FAST_REPLICATES,
///     Some(42),
/// )?;
/// assert!(contrast.difference.point() > 0.0);
/// # Ok::<(), causal_core::Error>(())
/// ```
pub fn causal_contrast<E>(
    data: &Dataset,
    estimator: E,
    n_samples: usize,
    seed: Option<u64>,
) -> Result<CausalContrast>
where
    E: EffectEstimator + Sync,
{
    let effects = bootstrap_effects(data, estimator, n_samples, seed)?;
    let difference = effects.measures(EffectMeasure::Difference)?;
    let ratio = match effects.measures(EffectMeasure::Ratio) {
        Ok(series) => Some(series),
        Err(Error::DivisionByZero(_)) => None,
        Err(other) => return Err(other),
    };
    Ok(CausalContrast {
        effects,
        difference,
        ratio,
    })
}
