//! Inverse probability weighting

use causal_core::{Dataset, EffectEstimator, EffectVector, Error, Result, TREATMENT_LEVELS};
use causal_models::LogisticRegression;
use causal_transform::PolynomialExpansion;
use tracing::trace;

/// Effect estimation by inverse probability of treatment weighting
///
/// Fits a logistic model for treatment assignment on polynomially
/// expanded covariates, weights each record by the inverse of its
/// fitted probability of the assignment it actually received, and
/// averages the outcome within each treatment level under those
/// weights. Confounding carried by the modeled covariates is removed
/// because every record stands in for the covariate pattern it
/// represents, not just for itself.
///
/// Weights are stabilized by default: each is multiplied by the
/// marginal share of its treatment level, which tames weight variance
/// without moving the per-level weighted means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IpwEstimator {
    degree: usize,
    stabilize: bool,
    model: LogisticRegression,
    probability_floor: Option<f64>,
}

impl Default for IpwEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpwEstimator {
    pub fn new() -> Self {
        Self {
            degree: 2,
            stabilize: true,
            model: LogisticRegression::new(),
            probability_floor: None,
        }
    }

    /// Polynomial degree of the assignment model's covariate expansion
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Multiply weights by the marginal treatment share (on by default)
    pub fn with_stabilization(mut self, stabilize: bool) -> Self {
        self.stabilize = stabilize;
        self
    }

    /// Replace the assignment model configuration
    pub fn with_model(mut self, model: LogisticRegression) -> Self {
        self.model = model;
        self
    }

    /// Clamp fitted assignment probabilities up to `floor`
    ///
    /// Off by default: a zero probability is then an error rather
    /// than a silently truncated weight.
    pub fn with_probability_floor(mut self, floor: f64) -> Self {
        assert!(
            floor > 0.0 && floor < 1.0,
            "Probability floor must be in (0, 1)"
        );
        self.probability_floor = Some(floor);
        self
    }

    /// Pr[A = a_i | L_i] per record, with the floor policy applied
    fn observed_probabilities(&self, data: &Dataset, treated: &[f64]) -> Result<Vec<f64>> {
        data.treatment()
            .iter()
            .zip(treated)
            .enumerate()
            .map(|(index, (&level, &treated_probability))| {
                let probability = if level == 1 {
                    treated_probability
                } else {
                    1.0 - treated_probability
                };
                match self.probability_floor {
                    Some(floor) => Ok(probability.max(floor)),
                    None if probability == 0.0 => {
                        Err(Error::DegenerateWeight { index, probability })
                    }
                    None => Ok(probability),
                }
            })
            .collect()
    }
}

impl EffectEstimator for IpwEstimator {
    fn estimate(&self, data: &Dataset) -> Result<EffectVector> {
        for level in TREATMENT_LEVELS {
            if !data.has_level(level) {
                return Err(Error::EmptyTreatmentGroup { level });
            }
        }
        let expanded = PolynomialExpansion::new(self.degree).expand(data)?;
        let fitted = self.model.fit(expanded.covariates(), data.treatment())?;
        let treated_probability = fitted.probabilities(expanded.covariates(), data.len())?;
        let probabilities = self.observed_probabilities(data, &treated_probability)?;

        let mut weights: Vec<f64> = probabilities.iter().map(|p| 1.0 / p).collect();
        if self.stabilize {
            for (weight, &level) in weights.iter_mut().zip(data.treatment()) {
                *weight *= data.level_share(level);
            }
        }

        let control = weighted_level_mean(data.outcome(), &weights, &data.level_indices(0));
        let treated = weighted_level_mean(data.outcome(), &weights, &data.level_indices(1));
        trace!(control, treated, "ipw estimate");
        Ok(EffectVector::new(control, treated))
    }

    fn name(&self) -> &'static str {
        "inverse probability weighting"
    }
}

/// Weighted outcome mean over the given record indices
///
/// Weights are strictly positive inverse probabilities, so the
/// denominator cannot vanish for a non-empty level.
fn weighted_level_mean(outcome: &[f64], weights: &[f64], indices: &[usize]) -> f64 {
    let mut weight_sum = 0.0;
    let mut weighted_outcome = 0.0;
    for &index in indices {
        weight_sum += weights[index];
        weighted_outcome += weights[index] * outcome[index];
    }
    weighted_outcome / weight_sum
}
