//! Logistic regression for treatment assignment models

use crate::design::{design_matrix, solve_least_squares, validate_columns};
use causal_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::trace;

/// Working weights below this are clamped to keep the Newton step finite
const MIN_WORKING_WEIGHT: f64 = 1e-10;

/// Coefficient penalty
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Penalty {
    /// Unpenalized maximum likelihood
    None,
    /// Ridge penalty on the non-intercept coefficients
    L2 { strength: f64 },
}

/// Optimizer used to fit the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Newton steps as iteratively reweighted least squares
    Irls,
    /// Fixed-step gradient ascent sized by a Lipschitz bound
    GradientDescent,
}

/// Binary logistic regression with builder-style configuration
///
/// Defaults: no penalty, IRLS, tolerance 1e-4 on the largest
/// coefficient change per iteration, 100 iterations. Exhausting the
/// iteration budget without converging is a [`Error::ModelFit`]
/// failure, as are non-finite iterates from separable data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegression {
    penalty: Penalty,
    solver: Solver,
    tolerance: f64,
    max_iterations: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            penalty: Penalty::None,
            solver: Solver::Irls,
            tolerance: 1e-4,
            max_iterations: 100,
        }
    }

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        if let Penalty::L2 { strength } = penalty {
            assert!(strength >= 0.0, "Ridge strength must be non-negative");
        }
        self.penalty = penalty;
        self
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        assert!(tolerance > 0.0, "Tolerance must be positive");
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "Iteration budget must be positive");
        self.max_iterations = max_iterations;
        self
    }

    /// Fit the model to column-major features and binary labels
    pub fn fit(&self, columns: &[Vec<f64>], labels: &[u8]) -> Result<FittedLogisticModel> {
        if labels.is_empty() {
            return Err(Error::empty_input("logistic regression labels"));
        }
        validate_columns(columns, labels.len())?;
        if let Some(&label) = labels.iter().find(|&&label| label > 1) {
            return Err(Error::InvalidInput(format!(
                "labels must be 0 or 1, got {label}"
            )));
        }
        let design = design_matrix(columns, labels.len());
        let target = DVector::from_iterator(labels.len(), labels.iter().map(|&label| f64::from(label)));
        let iterates = match self.solver {
            Solver::Irls => self.fit_irls(&design, &target),
            Solver::GradientDescent => self.fit_gradient(&design, &target),
        }?;
        Ok(FittedLogisticModel {
            intercept: iterates.beta[0],
            coefficients: iterates.beta.as_slice()[1..].to_vec(),
            iterations: iterates.iterations,
        })
    }

    fn fit_irls(&self, design: &DMatrix<f64>, target: &DVector<f64>) -> Result<Iterates> {
        let n = design.nrows();
        let mut beta = DVector::zeros(design.ncols());
        for iteration in 1..=self.max_iterations {
            let linear = design * &beta;
            let probabilities = linear.map(sigmoid);
            let mut weights = DVector::zeros(n);
            let mut working = DVector::zeros(n);
            for i in 0..n {
                let weight = (probabilities[i] * (1.0 - probabilities[i])).max(MIN_WORKING_WEIGHT);
                weights[i] = weight;
                working[i] = linear[i] + (target[i] - probabilities[i]) / weight;
            }
            let (augmented, response) = self.weighted_system(design, &weights, &working);
            let updated = solve_least_squares(&augmented, &response).map_err(|_| {
                Error::ModelFit(
                    "working least-squares step diverged; labels may be separable".to_string(),
                )
            })?;
            let step = (&updated - &beta).amax();
            beta = updated;
            trace!(iteration, step, "irls step");
            if step < self.tolerance {
                return Ok(Iterates {
                    beta,
                    iterations: iteration,
                });
            }
        }
        Err(Error::ModelFit(format!(
            "IRLS did not converge within {} iterations",
            self.max_iterations
        )))
    }

    /// Weighted least-squares system for one Newton step: rows scaled
    /// by sqrt(weight), ridge rows appended with zero response so the
    /// augmented solve is the exact penalized step
    fn weighted_system(
        &self,
        design: &DMatrix<f64>,
        weights: &DVector<f64>,
        working: &DVector<f64>,
    ) -> (DMatrix<f64>, DVector<f64>) {
        let n = design.nrows();
        let p = design.ncols();
        let ridge_rows = match self.penalty {
            Penalty::L2 { strength } if strength > 0.0 => p - 1,
            _ => 0,
        };
        let mut augmented = DMatrix::zeros(n + ridge_rows, p);
        let mut response = DVector::zeros(n + ridge_rows);
        for i in 0..n {
            let root = weights[i].sqrt();
            for j in 0..p {
                augmented[(i, j)] = root * design[(i, j)];
            }
            response[i] = root * working[i];
        }
        if ridge_rows > 0 {
            if let Penalty::L2 { strength } = self.penalty {
                let root = strength.sqrt();
                // the intercept column stays unpenalized
                for j in 1..p {
                    augmented[(n + j - 1, j)] = root;
                }
            }
        }
        (augmented, response)
    }

    fn fit_gradient(&self, design: &DMatrix<f64>, target: &DVector<f64>) -> Result<Iterates> {
        let p = design.ncols();
        let strength = match self.penalty {
            Penalty::L2 { strength } => strength,
            Penalty::None => 0.0,
        };
        // Frobenius bound on the gradient's Lipschitz constant
        let lipschitz = design.iter().map(|value| value * value).sum::<f64>() / 4.0 + strength;
        if lipschitz == 0.0 {
            return Err(Error::ModelFit("all-zero design matrix".to_string()));
        }
        let step_size = 1.0 / lipschitz;
        let mut beta = DVector::zeros(p);
        for iteration in 1..=self.max_iterations {
            let probabilities = (design * &beta).map(sigmoid);
            let residual = target - &probabilities;
            let mut gradient = design.transpose() * residual;
            if strength > 0.0 {
                for j in 1..p {
                    gradient[j] -= strength * beta[j];
                }
            }
            let update = gradient * step_size;
            let change = update.amax();
            beta += update;
            if beta.iter().any(|value| !value.is_finite()) {
                return Err(Error::ModelFit(
                    "non-finite coefficients; labels may be separable".to_string(),
                ));
            }
            trace!(iteration, change, "gradient step");
            if change < self.tolerance {
                return Ok(Iterates {
                    beta,
                    iterations: iteration,
                });
            }
        }
        Err(Error::ModelFit(format!(
            "gradient descent did not converge within {} iterations",
            self.max_iterations
        )))
    }
}

struct Iterates {
    beta: DVector<f64>,
    iterations: usize,
}

/// Coefficients of a fitted logistic model
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogisticModel {
    intercept: f64,
    coefficients: Vec<f64>,
    iterations: usize,
}

impl FittedLogisticModel {
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Iterations the solver took to converge
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Pr[label = 1] for one record
    pub fn probability_record(&self, features: &[f64]) -> f64 {
        let linear = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(coefficient, value)| coefficient * value)
                .sum::<f64>();
        sigmoid(linear)
    }

    /// Pr[label = 1] for every record of a column-major feature block
    pub fn probabilities(&self, columns: &[Vec<f64>], n_records: usize) -> Result<Vec<f64>> {
        if columns.len() != self.coefficients.len() {
            return Err(Error::size_mismatch(
                self.coefficients.len(),
                columns.len(),
                "prediction feature columns",
            ));
        }
        validate_columns(columns, n_records)?;
        let mut linear = vec![self.intercept; n_records];
        for (coefficient, column) in self.coefficients.iter().zip(columns) {
            for (value, feature) in linear.iter_mut().zip(column) {
                *value += coefficient * feature;
            }
        }
        Ok(linear.into_iter().map(sigmoid).collect())
    }
}

/// Numerically stable logistic sigmoid
fn sigmoid(value: f64) -> f64 {
    if value >= 0.0 {
        1.0 / (1.0 + (-value).exp())
    } else {
        let exponential = value.exp();
        exponential / (1.0 + exponential)
    }
}
