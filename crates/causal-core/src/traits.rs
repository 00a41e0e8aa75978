//! The estimator seam shared by all estimation strategies

use crate::dataset::Dataset;
use crate::effect::EffectVector;
use crate::error::Result;

/// A strategy that turns a dataset into per-level expected outcomes
///
/// Implementations are interchangeable wherever an effect estimate is
/// consumed, most importantly inside the bootstrap resampler: anything
/// that can estimate once can be resampled.
pub trait EffectEstimator {
    /// Estimate the expected outcome under each treatment level
    ///
    /// Fails with [`crate::Error::EmptyTreatmentGroup`] when a level has
    /// no records; other failures depend on the strategy.
    fn estimate(&self, data: &Dataset) -> Result<EffectVector>;

    /// Human-readable estimator name for logs and reports
    fn name(&self) -> &'static str;
}

impl<T: EffectEstimator + ?Sized> EffectEstimator for &T {
    fn estimate(&self, data: &Dataset) -> Result<EffectVector> {
        (**self).estimate(data)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
