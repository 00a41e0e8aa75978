//! Column store for observational records
//!
//! A [`Dataset`] holds one outcome and one binary treatment value per
//! record, plus zero or more covariate columns, all validated at
//! construction. Transforms and resampling return new owned datasets;
//! the input is never mutated.

use crate::error::{Error, Result};

/// The two levels of a binary treatment, in effect-vector order
pub const TREATMENT_LEVELS: [u8; 2] = [0, 1];

/// Validated column store of observational records
///
/// Columns are checked for equal length, finite values, and a binary
/// treatment when the dataset is built. Dichotomizing a raw continuous
/// treatment is the caller's concern; a binary treatment is a
/// precondition here.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    outcome: Vec<f64>,
    treatment: Vec<u8>,
    covariates: Vec<Vec<f64>>,
}

impl Dataset {
    /// Build a dataset from column vectors
    ///
    /// `covariates` is column-major: each inner vector is one covariate
    /// column of length `outcome.len()`.
    pub fn new(outcome: Vec<f64>, treatment: Vec<u8>, covariates: Vec<Vec<f64>>) -> Result<Self> {
        if outcome.is_empty() {
            return Err(Error::empty_input("outcome column"));
        }
        let n = outcome.len();
        if treatment.len() != n {
            return Err(Error::size_mismatch(n, treatment.len(), "treatment column"));
        }
        if outcome.iter().any(|value| !value.is_finite()) {
            return Err(Error::non_finite("outcome column"));
        }
        if let Some(&level) = treatment.iter().find(|&&level| level > 1) {
            return Err(Error::InvalidInput(format!(
                "treatment must be 0 or 1, got {level}"
            )));
        }
        validate_covariates(&covariates, n)?;
        Ok(Self {
            outcome,
            treatment,
            covariates,
        })
    }

    /// Build a dataset from rows laid out as `[outcome, treatment, covariates...]`
    ///
    /// Every row must have the same width and a treatment value of
    /// exactly 0.0 or 1.0.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::empty_input("rows"));
        }
        let width = rows[0].len();
        if width < 2 {
            return Err(Error::InvalidInput(
                "each row needs at least an outcome and a treatment".to_string(),
            ));
        }
        let mut outcome = Vec::with_capacity(rows.len());
        let mut treatment = Vec::with_capacity(rows.len());
        let mut covariates = vec![Vec::with_capacity(rows.len()); width - 2];
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::size_mismatch(width, row.len(), &format!("row {index}")));
            }
            outcome.push(row[0]);
            treatment.push(match row[1] {
                value if value == 0.0 => 0,
                value if value == 1.0 => 1,
                value => {
                    return Err(Error::InvalidInput(format!(
                        "treatment must be 0 or 1, got {value}"
                    )))
                }
            });
            for (column, &value) in covariates.iter_mut().zip(&row[2..]) {
                column.push(value);
            }
        }
        Self::new(outcome, treatment, covariates)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.outcome.len()
    }

    /// Whether the dataset has no records (never true after validation)
    pub fn is_empty(&self) -> bool {
        self.outcome.is_empty()
    }

    /// Number of covariate columns
    pub fn n_covariates(&self) -> usize {
        self.covariates.len()
    }

    /// Outcome column
    pub fn outcome(&self) -> &[f64] {
        &self.outcome
    }

    /// Treatment column
    pub fn treatment(&self) -> &[u8] {
        &self.treatment
    }

    /// Treatment column as floats, for use as a regression input
    pub fn treatment_as_f64(&self) -> Vec<f64> {
        self.treatment.iter().map(|&level| f64::from(level)).collect()
    }

    /// All covariate columns, column-major
    pub fn covariates(&self) -> &[Vec<f64>] {
        &self.covariates
    }

    /// One covariate column
    pub fn covariate(&self, index: usize) -> &[f64] {
        &self.covariates[index]
    }

    /// Indices of the records with this treatment level
    pub fn level_indices(&self, level: u8) -> Vec<usize> {
        self.treatment
            .iter()
            .enumerate()
            .filter(|(_, &assigned)| assigned == level)
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether any record has this treatment level
    pub fn has_level(&self, level: u8) -> bool {
        self.treatment.iter().any(|&assigned| assigned == level)
    }

    /// Marginal empirical share of this treatment level
    pub fn level_share(&self, level: u8) -> f64 {
        let count = self.treatment.iter().filter(|&&assigned| assigned == level).count();
        count as f64 / self.len() as f64
    }

    /// New dataset with the same outcome and treatment but replaced covariates
    ///
    /// Used by transforms; the replacement columns must match the record
    /// count and be finite.
    pub fn with_covariates(&self, covariates: Vec<Vec<f64>>) -> Result<Dataset> {
        validate_covariates(&covariates, self.len())?;
        Ok(Dataset {
            outcome: self.outcome.clone(),
            treatment: self.treatment.clone(),
            covariates,
        })
    }

    /// Copy of the dataset with every record's treatment forced to `level`
    pub fn counterfactual(&self, level: u8) -> Result<Dataset> {
        if level > 1 {
            return Err(Error::InvalidInput(format!(
                "treatment must be 0 or 1, got {level}"
            )));
        }
        Ok(Dataset {
            outcome: self.outcome.clone(),
            treatment: vec![level; self.len()],
            covariates: self.covariates.clone(),
        })
    }

    /// Gather records by index into a new dataset
    ///
    /// Indices may repeat; this is the primitive behind bootstrap
    /// resampling with replacement.
    pub fn resample(&self, indices: &[usize]) -> Result<Dataset> {
        if indices.is_empty() {
            return Err(Error::empty_input("resample indices"));
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= self.len()) {
            return Err(Error::InvalidInput(format!(
                "resample index {index} out of bounds for {} records",
                self.len()
            )));
        }
        Ok(Dataset {
            outcome: indices.iter().map(|&index| self.outcome[index]).collect(),
            treatment: indices.iter().map(|&index| self.treatment[index]).collect(),
            covariates: self
                .covariates
                .iter()
                .map(|column| indices.iter().map(|&index| column[index]).collect())
                .collect(),
        })
    }
}

fn validate_covariates(covariates: &[Vec<f64>], n: usize) -> Result<()> {
    for (index, column) in covariates.iter().enumerate() {
        if column.len() != n {
            return Err(Error::size_mismatch(
                n,
                column.len(),
                &format!("covariate column {index}"),
            ));
        }
        if column.iter().any(|value| !value.is_finite()) {
            return Err(Error::non_finite(&format!("covariate column {index}")));
        }
    }
    Ok(())
}
