//! Effect measures over a replicate set

use crate::resampler::ReplicateSet;
use causal_core::{EffectMeasure, Error, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::cmp::Ordering;
use std::fmt;

impl ReplicateSet {
    /// Collapse each effect vector to one measure value
    ///
    /// The measure must be defined on the original estimate; a ratio
    /// with a zero control mean fails here. On replicates an undefined
    /// ratio is isolated instead: the value is dropped and counted, so
    /// one degenerate replicate cannot poison the series.
    pub fn measures(&self, measure: EffectMeasure) -> Result<MeasureSeries> {
        let original = self.original();
        let point = measure.apply(&original)?;
        let mut values = Vec::with_capacity(self.len());
        let mut undefined = 0;
        for vector in self.replicates() {
            match measure.apply(vector) {
                Ok(value) => values.push(value),
                Err(Error::DivisionByZero(_)) => undefined += 1,
                Err(other) => return Err(other),
            }
        }
        Ok(MeasureSeries {
            measure,
            point,
            values,
            undefined,
        })
    }
}

/// One effect measure applied across a bootstrap run
///
/// Keeps the point estimate from the original data next to the
/// replicate values it is compared against. The raw value sequence is
/// always available; the interval methods are summaries of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSeries {
    measure: EffectMeasure,
    point: f64,
    values: Vec<f64>,
    undefined: usize,
}

impl MeasureSeries {
    pub fn measure(&self) -> EffectMeasure {
        self.measure
    }

    /// Measure value on the original data
    pub fn point(&self) -> f64 {
        self.point
    }

    /// Replicate measure values, in replicate order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Replicates dropped because the measure was undefined on them
    pub fn undefined(&self) -> usize {
        self.undefined
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Sample standard deviation of the replicate values
    pub fn std_dev(&self) -> Option<f64> {
        if self.values.len() < 2 {
            return None;
        }
        let mean = self.mean()?;
        let variance = self
            .values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (self.values.len() - 1) as f64;
        Some(variance.sqrt())
    }

    /// Empirical percentile interval from the sorted replicate values
    pub fn percentile_interval(&self, confidence_level: f64) -> Result<ConfidenceInterval> {
        validate_confidence_level(confidence_level)?;
        if self.values.is_empty() {
            return Err(Error::empty_input("replicate measure values"));
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let n = sorted.len();
        let alpha = 1.0 - confidence_level;
        let lower_index = ((alpha / 2.0) * n as f64) as usize;
        let upper_index = (((1.0 - alpha / 2.0) * n as f64) as usize).min(n - 1);
        Ok(ConfidenceInterval {
            lower: sorted[lower_index],
            upper: sorted[upper_index],
            estimate: self.point,
            confidence_level,
        })
    }

    /// Normal approximation: point estimate plus/minus z times the
    /// replicate standard deviation
    pub fn normal_interval(&self, confidence_level: f64) -> Result<ConfidenceInterval> {
        validate_confidence_level(confidence_level)?;
        let std_dev = self.std_dev().ok_or_else(|| Error::InsufficientData {
            expected: 2,
            actual: self.values.len(),
        })?;
        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            Error::Computation(format!("Failed to create normal distribution: {e}"))
        })?;
        let z = normal.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0);
        let margin = z * std_dev;
        Ok(ConfidenceInterval {
            lower: self.point - margin,
            upper: self.point + margin,
            estimate: self.point,
            confidence_level,
        })
    }
}

fn validate_confidence_level(confidence_level: f64) -> Result<()> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(Error::InvalidInput(format!(
            "confidence level must be in (0, 1), got {confidence_level}"
        )));
    }
    Ok(())
}

/// Two-sided confidence interval around a point estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub estimate: f64,
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} [{:.6}, {:.6}] ({:.0}% CI)",
            self.estimate,
            self.lower,
            self.upper,
            self.confidence_level * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use causal_core::EffectVector;
    use proptest::prelude::*;

    fn set_from_differences(point: (f64, f64), pairs: &[(f64, f64)]) -> ReplicateSet {
        let replicates = pairs
            .iter()
            .map(|&(control, treated)| EffectVector::new(control, treated))
            .collect();
        ReplicateSet::new(EffectVector::new(point.0, point.1), replicates, 0)
    }

    #[test]
    fn test_difference_series() {
        let set = set_from_differences(
            (0.25, 0.75),
            &[(0.25, 0.5), (0.5, 1.5), (0.25, 0.75), (1.0, 1.5)],
        );
        let series = set.measures(EffectMeasure::Difference).unwrap();
        assert_relative_eq!(series.point(), 0.5);
        assert_eq!(series.values(), &[0.25, 1.0, 0.5, 0.5]);
        assert_eq!(series.undefined(), 0);
        assert_relative_eq!(series.mean().unwrap(), 0.5625);
        // sample variance of [0.25, 1.0, 0.5, 0.5] is 19/192
        assert_relative_eq!(
            series.std_dev().unwrap().powi(2),
            19.0 / 192.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_undefined_ratios_are_isolated() {
        let set = set_from_differences(
            (0.5, 1.0),
            &[(0.5, 1.5), (0.0, 1.0), (0.25, 1.0)],
        );
        let ratios = set.measures(EffectMeasure::Ratio).unwrap();
        assert_eq!(ratios.len(), 2);
        assert_eq!(ratios.undefined(), 1);
        assert_eq!(ratios.values(), &[3.0, 4.0]);

        // the same replicate stays in the difference series
        let differences = set.measures(EffectMeasure::Difference).unwrap();
        assert_eq!(differences.len(), 3);
        assert_eq!(differences.undefined(), 0);
    }

    #[test]
    fn test_undefined_point_ratio_fails() {
        let set = set_from_differences((0.0, 1.0), &[(0.5, 1.0)]);
        let result = set.measures(EffectMeasure::Ratio);
        assert!(matches!(result, Err(Error::DivisionByZero(_))));
        // difference is still fine on the same set
        assert!(set.measures(EffectMeasure::Difference).is_ok());
    }

    #[test]
    fn test_percentile_interval_indices() {
        let pairs: Vec<(f64, f64)> = (1..=10).map(|value| (0.0, value as f64)).collect();
        let set = set_from_differences((0.0, 5.0), &pairs);
        let series = set.measures(EffectMeasure::Difference).unwrap();

        let wide = series.percentile_interval(0.9).unwrap();
        assert_relative_eq!(wide.lower, 1.0);
        assert_relative_eq!(wide.upper, 10.0);
        assert_relative_eq!(wide.estimate, 5.0);

        let narrow = series.percentile_interval(0.5).unwrap();
        assert_relative_eq!(narrow.lower, 3.0);
        assert_relative_eq!(narrow.upper, 8.0);
    }

    #[test]
    fn test_normal_interval_uses_z_quantile() {
        // replicate differences -1 and 1: mean 0, sample sd sqrt(2)
        let set = set_from_differences((0.0, 0.0), &[(0.0, -1.0), (0.0, 1.0)]);
        let series = set.measures(EffectMeasure::Difference).unwrap();
        let interval = series.normal_interval(0.95).unwrap();
        let margin = 1.959964 * 2.0f64.sqrt();
        assert_abs_diff_eq!(interval.upper, margin, epsilon = 1e-4);
        assert_abs_diff_eq!(interval.lower, -margin, epsilon = 1e-4);
        assert_relative_eq!(interval.estimate, 0.0);
    }

    #[test]
    fn test_normal_interval_needs_two_values() {
        let set = set_from_differences((0.0, 1.0), &[(0.0, 1.0)]);
        let series = set.measures(EffectMeasure::Difference).unwrap();
        let result = series.normal_interval(0.95);
        assert!(matches!(
            result,
            Err(Error::InsufficientData {
                expected: 2,
                actual: 1
            })
        ));
        // a single value still has a (degenerate) percentile interval
        let interval = series.percentile_interval(0.95).unwrap();
        assert_relative_eq!(interval.lower, 1.0);
        assert_relative_eq!(interval.upper, 1.0);
    }

    #[test]
    fn test_empty_series() {
        let set = set_from_differences((0.0, 1.0), &[]);
        let series = set.measures(EffectMeasure::Difference).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.mean(), None);
        assert_eq!(series.std_dev(), None);
        assert!(series.percentile_interval(0.95).is_err());
    }

    #[test]
    fn test_confidence_level_validation() {
        let set = set_from_differences((0.0, 1.0), &[(0.0, 1.0), (0.0, 2.0)]);
        let series = set.measures(EffectMeasure::Difference).unwrap();
        for level in [0.0, 1.0, 1.5, -0.1] {
            assert!(matches!(
                series.percentile_interval(level),
                Err(Error::InvalidInput(_))
            ));
            assert!(matches!(
                series.normal_interval(level),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_interval_width_and_contains() {
        let interval = ConfidenceInterval {
            lower: -1.0,
            upper: 3.0,
            estimate: 1.0,
            confidence_level: 0.95,
        };
        assert_relative_eq!(interval.width(), 4.0);
        assert!(interval.contains(0.0));
        assert!(interval.contains(-1.0));
        assert!(interval.contains(3.0));
        assert!(!interval.contains(3.1));
    }

    #[test]
    fn test_interval_display() {
        let interval = ConfidenceInterval {
            lower: 0.25,
            upper: 0.75,
            estimate: 0.5,
            confidence_level: 0.95,
        };
        let rendered = format!("{interval}");
        assert!(rendered.contains("0.500000"));
        assert!(rendered.contains("[0.250000, 0.750000]"));
        assert!(rendered.contains("95% CI"));
    }

    proptest! {
        #[test]
        fn prop_percentile_bounds_are_ordered(
            treated in prop::collection::vec(-100.0..100.0f64, 1..50),
            confidence_level in 0.5..0.99f64,
        ) {
            let pairs: Vec<(f64, f64)> = treated.iter().map(|&value| (0.0, value)).collect();
            let set = set_from_differences((0.0, 0.0), &pairs);
            let series = set.measures(EffectMeasure::Difference).unwrap();
            let interval = series.percentile_interval(confidence_level).unwrap();
            prop_assert!(interval.lower <= interval.upper);
        }
    }
}
