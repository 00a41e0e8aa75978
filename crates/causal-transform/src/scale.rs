//! Covariate standardization
//!
//! Rescales every covariate column to zero mean and unit variance. The
//! statistics are refit from the input on each call, so transforming
//! two datasets never shares state between them.

use causal_core::{Dataset, Error, Result};

/// Mean and population standard deviation of one column
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnScale {
    mean: f64,
    std_dev: f64,
}

fn column_scale(values: &[f64]) -> ColumnScale {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|value| {
            let deviation = value - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / n;
    ColumnScale {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Rescale every covariate column to zero mean and unit variance
///
/// Returns a new dataset; outcome and treatment pass through unchanged
/// and the input is not modified. A constant column has no scale and
/// fails with [`Error::DegenerateColumn`].
///
/// When resampling, standardize once *before* drawing replicates so the
/// original estimate and every replicate share one scale.
pub fn standardize(data: &Dataset) -> Result<Dataset> {
    let mut rescaled = Vec::with_capacity(data.n_covariates());
    for (index, column) in data.covariates().iter().enumerate() {
        let scale = column_scale(column);
        if scale.std_dev == 0.0 {
            return Err(Error::DegenerateColumn { index });
        }
        rescaled.push(
            column
                .iter()
                .map(|value| (value - scale.mean) / scale.std_dev)
                .collect(),
        );
    }
    data.with_covariates(rescaled)
}
