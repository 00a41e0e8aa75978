//! Ordinary least squares on an intercept-augmented design

use crate::design::{design_matrix, solve_least_squares, validate_columns};
use causal_core::{Error, Result};
use nalgebra::DVector;

/// Ordinary least squares linear regression
///
/// Always fits an intercept. Rank-deficient designs (duplicate
/// polynomial terms, constant columns) resolve to the minimum-norm
/// coefficient vector, so fitted values stay well defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegression;

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }

    /// Fit the model to column-major features and a response
    pub fn fit(&self, columns: &[Vec<f64>], response: &[f64]) -> Result<FittedLinearModel> {
        if response.is_empty() {
            return Err(Error::empty_input("linear regression response"));
        }
        validate_columns(columns, response.len())?;
        let design = design_matrix(columns, response.len());
        let target = DVector::from_column_slice(response);
        let solution = solve_least_squares(&design, &target)?;
        Ok(FittedLinearModel {
            intercept: solution[0],
            coefficients: solution.as_slice()[1..].to_vec(),
        })
    }
}

/// Coefficients of a fitted linear model
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl FittedLinearModel {
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Predict one record from its feature values
    pub fn predict_record(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(coefficient, value)| coefficient * value)
                .sum::<f64>()
    }

    /// Predict every record of a column-major feature block
    ///
    /// The block must have one column per fitted coefficient and
    /// `n_records` values per column.
    pub fn predict(&self, columns: &[Vec<f64>], n_records: usize) -> Result<Vec<f64>> {
        if columns.len() != self.coefficients.len() {
            return Err(Error::size_mismatch(
                self.coefficients.len(),
                columns.len(),
                "prediction feature columns",
            ));
        }
        validate_columns(columns, n_records)?;
        let mut predictions = vec![self.intercept; n_records];
        for (coefficient, column) in self.coefficients.iter().zip(columns) {
            for (prediction, value) in predictions.iter_mut().zip(column) {
                *prediction += coefficient * value;
            }
        }
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_exact_line() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 + 3.0 * v).collect();
        let model = LinearRegression::new().fit(&[x.clone()], &y).unwrap();
        assert_relative_eq!(model.intercept(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients()[0], 3.0, epsilon = 1e-10);

        let predictions = model.predict(&[x], y.len()).unwrap();
        for (prediction, expected) in predictions.iter().zip(&y) {
            assert_relative_eq!(prediction, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_two_features() {
        let x1 = vec![0.0, 1.0, 0.0, 1.0, 2.0];
        let x2 = vec![0.0, 0.0, 1.0, 1.0, 3.0];
        let y: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 1.0 + 2.0 * a - 0.5 * b)
            .collect();
        let model = LinearRegression::new().fit(&[x1, x2], &y).unwrap();
        assert_relative_eq!(model.intercept(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients()[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(model.coefficients()[1], -0.5, epsilon = 1e-10);
        assert_relative_eq!(model.predict_record(&[2.0, 2.0]), 4.0, epsilon = 1e-10);
    }

    #[test]
    fn test_duplicate_columns_predict_correctly() {
        // l^2 == l for a binary column; fitted values must survive the
        // rank deficiency
        let l = vec![0.0, 0.0, 1.0, 1.0];
        let y = vec![1.0, 1.0, 4.0, 4.0];
        let model = LinearRegression::new()
            .fit(&[l.clone(), l.clone()], &y)
            .unwrap();
        let predictions = model.predict(&[l.clone(), l], 4).unwrap();
        for (prediction, expected) in predictions.iter().zip(&y) {
            assert_relative_eq!(prediction, expected, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_constant_response() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![7.0; 4];
        let model = LinearRegression::new().fit(&[x.clone()], &y).unwrap();
        assert_relative_eq!(model.intercept(), 7.0, epsilon = 1e-9);
        assert_relative_eq!(model.coefficients()[0], 0.0, epsilon = 1e-9);
        let predictions = model.predict(&[vec![10.0, -3.0, 0.5, 2.0]], 4).unwrap();
        for prediction in predictions {
            assert_relative_eq!(prediction, 7.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_shape_validation() {
        assert!(LinearRegression::new().fit(&[], &[]).is_err());
        assert!(LinearRegression::new()
            .fit(&[vec![1.0]], &[1.0, 2.0])
            .is_err());

        let model = LinearRegression::new()
            .fit(&[vec![0.0, 1.0]], &[0.0, 1.0])
            .unwrap();
        assert!(model.predict(&[], 2).is_err());
        assert!(model.predict(&[vec![1.0]], 2).is_err());
    }
}
