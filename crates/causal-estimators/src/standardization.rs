//! Regression standardization (the parametric g-formula)

use causal_core::{Dataset, EffectEstimator, EffectVector, Error, Result, TREATMENT_LEVELS};
use causal_models::{FittedLinearModel, LinearRegression};
use causal_transform::PolynomialExpansion;
use tracing::trace;

/// Effect estimation by standardizing a fitted outcome model
///
/// Fits a linear outcome model on a polynomial expansion that
/// includes the treatment indicator, then predicts every record's
/// outcome under each counterfactual assignment and averages the
/// predictions. Because the expansion carries treatment main effects
/// and treatment-by-covariate interactions, the model can express
/// effects that differ across covariate patterns; the averaging step
/// standardizes them to the observed covariate distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardizationEstimator {
    degree: usize,
}

impl Default for StandardizationEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardizationEstimator {
    pub fn new() -> Self {
        Self { degree: 2 }
    }

    /// Polynomial degree of the outcome model's expansion
    ///
    /// Degree 0 still keeps the linear terms, treatment included, so
    /// the counterfactual contrast never degenerates to a constant.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Mean predicted outcome with every record assigned `level`
    fn standardized_mean(
        &self,
        data: &Dataset,
        expansion: PolynomialExpansion,
        model: &FittedLinearModel,
        level: u8,
    ) -> Result<f64> {
        let counterfactual = data.counterfactual(level)?;
        let expanded = expansion.expand(&counterfactual)?;
        let predictions = model.predict(expanded.covariates(), data.len())?;
        Ok(predictions.iter().sum::<f64>() / predictions.len() as f64)
    }
}

impl EffectEstimator for StandardizationEstimator {
    fn estimate(&self, data: &Dataset) -> Result<EffectVector> {
        for level in TREATMENT_LEVELS {
            if !data.has_level(level) {
                return Err(Error::EmptyTreatmentGroup { level });
            }
        }
        let expansion = PolynomialExpansion::new(self.degree).with_treatment();
        let expanded = expansion.expand(data)?;
        let fitted = LinearRegression::new().fit(expanded.covariates(), data.outcome())?;

        let control = self.standardized_mean(data, expansion, &fitted, 0)?;
        let treated = self.standardized_mean(data, expansion, &fitted, 1)?;
        trace!(control, treated, "standardization estimate");
        Ok(EffectVector::new(control, treated))
    }

    fn name(&self) -> &'static str {
        "regression standardization"
    }
}
