//! Covariate transforms for causal effect estimation
//!
//! Two transforms feed the estimation strategies:
//!
//! - [`standardize`] rescales each covariate column to zero mean and
//!   unit variance, refitting the statistics on every call.
//! - [`PolynomialExpansion`] replaces the covariate block with all
//!   monomial terms up to a degree, optionally folding the treatment
//!   into the inputs so treatment interactions appear among the terms.
//!
//! Both are copy-on-transform: they return new datasets and never
//! mutate their input.
//!
//! # Examples
//!
//! ```rust
//! use causal_core::Dataset;
//! use causal_transform::{standardize, PolynomialExpansion};
//!
//! let data = Dataset::new(
//!     vec![1.0, 0.0, 1.0],
//!     vec![0, 1, 1],
//!     vec![vec![1.0, 2.0, 3.0]],
//! ).unwrap();
//!
//! let rescaled = standardize(&data).unwrap();
//! let expanded = PolynomialExpansion::new(2).expand(&rescaled).unwrap();
//! assert_eq!(expanded.n_covariates(), 2); // [l, l^2]
//! ```

mod polynomial;
mod scale;

// Re-exports
pub use polynomial::PolynomialExpansion;
pub use scale::standardize;
