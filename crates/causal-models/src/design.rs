//! Design matrix assembly and the shared least-squares core

use causal_core::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Assemble an n x (p + 1) design matrix with a leading intercept column
pub(crate) fn design_matrix(columns: &[Vec<f64>], n_records: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n_records, columns.len() + 1, |row, col| {
        if col == 0 {
            1.0
        } else {
            columns[col - 1][row]
        }
    })
}

/// Check that every feature column matches the record count
pub(crate) fn validate_columns(columns: &[Vec<f64>], n_records: usize) -> Result<()> {
    for (index, column) in columns.iter().enumerate() {
        if column.len() != n_records {
            return Err(Error::size_mismatch(
                n_records,
                column.len(),
                &format!("feature column {index}"),
            ));
        }
    }
    Ok(())
}

/// Minimum-norm least squares via SVD with a tolerance ladder
///
/// Rank-deficient systems (duplicate expanded columns, a constant
/// column shadowing the intercept) resolve to the minimum-norm
/// solution instead of failing.
pub(crate) fn solve_least_squares(
    design: &DMatrix<f64>,
    response: &DVector<f64>,
) -> Result<DVector<f64>> {
    let svd = design.clone().svd(true, true);
    for &tolerance in &[1e-10, 1e-8, 1e-6] {
        if let Ok(solution) = svd.solve(response, tolerance) {
            if solution.iter().all(|value| value.is_finite()) {
                return Ok(solution);
            }
        }
    }
    Err(Error::ModelFit(
        "no finite least-squares solution at any singular value tolerance".to_string(),
    ))
}
