//! Nonparametric bootstrap over whole records

use crate::api::DEFAULT_REPLICATES;
use causal_core::{Dataset, EffectEstimator, EffectVector, Error, Result};
use causal_transform::standardize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bootstrap resampler around any effect estimator
///
/// Each replicate redraws the dataset's records with replacement,
/// keeping outcome, treatment and covariates of a record together,
/// and reruns the estimator on the redrawn data. The spread of the
/// replicate estimates is the sampling uncertainty of the original
/// estimate.
///
/// Covariates are standardized once up front by default so that the
/// original estimate and every replicate are fitted on one shared
/// scale. Replicate randomness comes from per-replicate ChaCha
/// streams seeded from a master stream, which makes a seeded run
/// reproducible bit for bit whether replicates execute sequentially
/// or on a rayon pool.
#[derive(Debug, Clone)]
pub struct Bootstrap<E> {
    estimator: E,
    n_samples: usize,
    seed: Option<u64>,
    standardize_first: bool,
    max_retries: usize,
}

impl<E: EffectEstimator + Sync> Bootstrap<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            n_samples: DEFAULT_REPLICATES,
            seed: None,
            standardize_first: true,
            max_retries: 10,
        }
    }

    /// Number of bootstrap replicates (zero is allowed)
    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    /// Fix the master seed for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Standardize covariates before estimating (on by default)
    pub fn with_standardization(mut self, standardize_first: bool) -> Self {
        self.standardize_first = standardize_first;
        self
    }

    /// Redraw budget for replicates that lose a treatment group
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Estimate on the original data, then on every replicate
    ///
    /// An estimator failure on the original data aborts the run
    /// immediately. Within replicates only a missing treatment group
    /// is retried; any other failure is a real modeling problem and
    /// propagates as-is.
    #[instrument(skip_all, fields(n_records = data.len(), n_samples = self.n_samples))]
    pub fn run(&self, data: &Dataset) -> Result<ReplicateSet> {
        let working = if self.standardize_first {
            standardize(data)?
        } else {
            data.clone()
        };
        let original = self.estimator.estimate(&working)?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => rand::thread_rng().gen(),
        };
        let mut master = ChaCha8Rng::seed_from_u64(seed);
        let sub_seeds: Vec<u64> = (0..self.n_samples).map(|_| master.gen()).collect();

        let replicates = self.run_replicates(&working, &sub_seeds)?;
        debug!(seed, replicates = replicates.len(), "bootstrap run complete");
        Ok(ReplicateSet {
            original,
            replicates,
            seed,
        })
    }

    #[cfg(feature = "parallel")]
    fn run_replicates(&self, data: &Dataset, sub_seeds: &[u64]) -> Result<Vec<EffectVector>> {
        use rayon::prelude::*;
        sub_seeds
            .par_iter()
            .enumerate()
            .map(|(replicate, &sub_seed)| self.one_replicate(data, replicate, sub_seed))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_replicates(&self, data: &Dataset, sub_seeds: &[u64]) -> Result<Vec<EffectVector>> {
        sub_seeds
            .iter()
            .enumerate()
            .map(|(replicate, &sub_seed)| self.one_replicate(data, replicate, sub_seed))
            .collect()
    }

    fn one_replicate(
        &self,
        data: &Dataset,
        replicate: usize,
        sub_seed: u64,
    ) -> Result<EffectVector> {
        let mut rng = ChaCha8Rng::seed_from_u64(sub_seed);
        let mut attempts = 0;
        loop {
            attempts += 1;
            let indices: Vec<usize> = (0..data.len())
                .map(|_| rng.gen_range(0..data.len()))
                .collect();
            let resampled = data.resample(&indices)?;
            match self.estimator.estimate(&resampled) {
                Ok(vector) => return Ok(vector),
                Err(Error::EmptyTreatmentGroup { .. }) if attempts <= self.max_retries => {
                    debug!(replicate, attempts, "replicate lost a treatment group, redrawing");
                }
                Err(Error::EmptyTreatmentGroup { level }) => {
                    return Err(Error::DegenerateReplicate {
                        replicate,
                        attempts,
                        source: Box::new(Error::EmptyTreatmentGroup { level }),
                    });
                }
                Err(other) => return Err(other),
            }
        }
    }
}

/// Effect estimates from one bootstrap run
///
/// Holds the original-data estimate, the replicate estimates in
/// replicate order, and the master seed that produced them. Rerunning
/// with the recorded seed reproduces the set exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateSet {
    original: EffectVector,
    replicates: Vec<EffectVector>,
    seed: u64,
}

impl ReplicateSet {
    pub fn new(original: EffectVector, replicates: Vec<EffectVector>, seed: u64) -> Self {
        Self {
            original,
            replicates,
            seed,
        }
    }

    /// Estimate from the unresampled data
    pub fn original(&self) -> EffectVector {
        self.original
    }

    /// Replicate estimates in replicate order
    pub fn replicates(&self) -> &[EffectVector] {
        &self.replicates
    }

    pub fn len(&self) -> usize {
        self.replicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicates.is_empty()
    }

    /// Master seed of the run, recorded even when it came from entropy
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
