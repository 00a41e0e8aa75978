//! Regression models for causal effect estimation
//!
//! Two fitted-model flavors back the estimators: [`LinearRegression`]
//! for outcome models solved in one least-squares pass, and
//! [`LogisticRegression`] for treatment assignment probabilities,
//! fitted by IRLS or gradient descent. Both accept column-major
//! feature blocks and solve through a rank-revealing SVD, so
//! collinear expansions (a squared binary treatment, say) degrade to
//! a minimum-norm fit instead of failing.
//!
//! # Example
//!
//! ```
//! use causal_models::LinearRegression;
//!
//! let x = vec![0.0, 1.0, 2.0, 3.0];
//! let y = vec![1.0, 3.0, 5.0, 7.0];
//! let model = LinearRegression::new().fit(&[x], &y)?;
//! assert!((model.intercept() - 1.0).abs() < 1e-8);
//! assert!((model.coefficients()[0] - 2.0).abs() < 1e-8);
//! # Ok::<(), causal_core::Error>(())
//! ```

mod design;
mod linear;
mod logistic;

pub use linear::{FittedLinearModel, LinearRegression};
pub use logistic::{FittedLogisticModel, LogisticRegression, Penalty, Solver};
