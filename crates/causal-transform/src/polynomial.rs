//! Polynomial and interaction feature expansion
//!
//! Replaces the covariate block with all monomial terms of the input
//! columns up to a configured degree, the feature set behind both the
//! assignment and the outcome models.

use causal_core::{Dataset, Result};

/// Polynomial feature expansion over the covariate block
///
/// Terms are generated degree by degree: the degree-1 terms in input
/// order, then for each total degree the combinations with replacement
/// of input columns in lexicographic order. No bias column is emitted;
/// regression designs add their own intercept.
///
/// The term structure is a pure function of the input width and the
/// degree, so the same expansion applied to a counterfactual copy of a
/// dataset yields columns aligned with previously fitted coefficients.
/// Output width grows combinatorially; bounding the degree is the
/// caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialExpansion {
    degree: usize,
    include_treatment: bool,
}

impl PolynomialExpansion {
    /// Expansion over the covariate columns only
    pub fn new(degree: usize) -> Self {
        Self {
            degree,
            include_treatment: false,
        }
    }

    /// Fold the treatment column into the expansion inputs
    ///
    /// The treatment becomes the first input column, so its main
    /// effect, powers, and interactions with every covariate appear
    /// among the generated terms. A degree of 0 still emits the linear
    /// input set, keeping a treatment term in downstream designs.
    pub fn with_treatment(mut self) -> Self {
        self.include_treatment = true;
        self
    }

    /// Configured degree
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether the treatment column joins the expansion inputs
    pub fn includes_treatment(&self) -> bool {
        self.include_treatment
    }

    /// Number of columns [`expand`](Self::expand) produces for `n_inputs` input columns
    pub fn output_width(&self, n_inputs: usize) -> usize {
        (1..=self.degree.max(1))
            .map(|degree| n_multisets(n_inputs, degree))
            .sum()
    }

    /// Expand the dataset's covariate block into polynomial terms
    ///
    /// Returns a new dataset whose covariates are the generated terms;
    /// outcome and treatment pass through unchanged.
    pub fn expand(&self, data: &Dataset) -> Result<Dataset> {
        let mut inputs: Vec<Vec<f64>> =
            Vec::with_capacity(data.n_covariates() + usize::from(self.include_treatment));
        if self.include_treatment {
            inputs.push(data.treatment_as_f64());
        }
        inputs.extend(data.covariates().iter().cloned());

        let mut terms = Vec::with_capacity(self.output_width(inputs.len()));
        for degree in 1..=self.degree.max(1) {
            for combo in multisets(inputs.len(), degree) {
                terms.push(product_column(&inputs, &combo, data.len()));
            }
        }
        data.with_covariates(terms)
    }
}

/// Non-decreasing index tuples of length `degree` over `0..n_inputs`,
/// in lexicographic order
fn multisets(n_inputs: usize, degree: usize) -> Vec<Vec<usize>> {
    let mut combos = Vec::new();
    if n_inputs == 0 || degree == 0 {
        return combos;
    }
    let mut indices = vec![0usize; degree];
    loop {
        combos.push(indices.clone());
        let mut position = degree;
        loop {
            if position == 0 {
                return combos;
            }
            position -= 1;
            if indices[position] + 1 < n_inputs {
                let next = indices[position] + 1;
                for slot in indices.iter_mut().skip(position) {
                    *slot = next;
                }
                break;
            }
        }
    }
}

/// C(n + d - 1, d), the multiset count; exact under integer division
/// because each prefix product is divisible
fn n_multisets(n_inputs: usize, degree: usize) -> usize {
    if n_inputs == 0 {
        return 0;
    }
    let mut count = 1usize;
    for i in 0..degree {
        count = count * (n_inputs + i) / (i + 1);
    }
    count
}

fn product_column(inputs: &[Vec<f64>], combo: &[usize], n: usize) -> Vec<f64> {
    let mut column = vec![1.0; n];
    for &input in combo {
        for (value, factor) in column.iter_mut().zip(&inputs[input]) {
            *value *= factor;
        }
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn two_covariate_dataset() -> Dataset {
        Dataset::new(
            vec![1.0, 2.0, 3.0],
            vec![0, 1, 1],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_degree_one_keeps_inputs() {
        let data = two_covariate_dataset();
        let expanded = PolynomialExpansion::new(1).expand(&data).unwrap();
        assert_eq!(expanded.n_covariates(), 2);
        assert_eq!(expanded.covariate(0), data.covariate(0));
        assert_eq!(expanded.covariate(1), data.covariate(1));
    }

    #[test]
    fn test_degree_zero_matches_degree_one() {
        let data = two_covariate_dataset();
        let zero = PolynomialExpansion::new(0).expand(&data).unwrap();
        let one = PolynomialExpansion::new(1).expand(&data).unwrap();
        assert_eq!(zero.covariates(), one.covariates());
    }

    #[test]
    fn test_degree_two_term_order_and_values() {
        let data = two_covariate_dataset();
        let expanded = PolynomialExpansion::new(2).expand(&data).unwrap();
        // [x, y, x^2, xy, y^2]
        assert_eq!(expanded.n_covariates(), 5);
        assert_eq!(expanded.covariate(0), &[1.0, 2.0, 3.0]);
        assert_eq!(expanded.covariate(1), &[4.0, 5.0, 6.0]);
        assert_eq!(expanded.covariate(2), &[1.0, 4.0, 9.0]);
        assert_eq!(expanded.covariate(3), &[4.0, 10.0, 18.0]);
        assert_eq!(expanded.covariate(4), &[16.0, 25.0, 36.0]);
        // outcome and treatment pass through
        assert_eq!(expanded.outcome(), data.outcome());
        assert_eq!(expanded.treatment(), data.treatment());
    }

    #[test]
    fn test_degree_three_single_input() {
        let data = Dataset::new(
            vec![0.0, 0.0, 0.0],
            vec![0, 1, 0],
            vec![vec![2.0, 3.0, 4.0]],
        )
        .unwrap();
        let expanded = PolynomialExpansion::new(3).expand(&data).unwrap();
        assert_eq!(expanded.n_covariates(), 3);
        assert_eq!(expanded.covariate(0), &[2.0, 3.0, 4.0]);
        assert_eq!(expanded.covariate(1), &[4.0, 9.0, 16.0]);
        assert_eq!(expanded.covariate(2), &[8.0, 27.0, 64.0]);
    }

    #[test]
    fn test_treatment_leads_the_inputs() {
        let data = Dataset::new(
            vec![0.0, 0.0, 0.0],
            vec![0, 1, 1],
            vec![vec![2.0, 3.0, 4.0]],
        )
        .unwrap();
        let expanded = PolynomialExpansion::new(2)
            .with_treatment()
            .expand(&data)
            .unwrap();
        // [a, l, a^2, al, l^2]
        assert_eq!(expanded.n_covariates(), 5);
        assert_eq!(expanded.covariate(0), &[0.0, 1.0, 1.0]);
        assert_eq!(expanded.covariate(1), &[2.0, 3.0, 4.0]);
        assert_eq!(expanded.covariate(2), &[0.0, 1.0, 1.0]);
        assert_eq!(expanded.covariate(3), &[0.0, 3.0, 4.0]);
        assert_eq!(expanded.covariate(4), &[4.0, 9.0, 16.0]);
        // the treatment column itself is untouched
        assert_eq!(expanded.treatment(), &[0, 1, 1]);
    }

    #[test]
    fn test_degree_zero_with_treatment_keeps_treatment_term() {
        let data = Dataset::new(
            vec![0.0, 0.0, 0.0],
            vec![0, 1, 1],
            vec![vec![2.0, 3.0, 4.0]],
        )
        .unwrap();
        let expanded = PolynomialExpansion::new(0)
            .with_treatment()
            .expand(&data)
            .unwrap();
        assert_eq!(expanded.n_covariates(), 2);
        assert_eq!(expanded.covariate(0), &[0.0, 1.0, 1.0]);
        assert_eq!(expanded.covariate(1), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_binary_column_square_collapses_to_itself() {
        // a binary covariate squared duplicates itself; downstream
        // solvers must tolerate the rank deficiency
        let data = Dataset::new(
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0, 1, 0, 1],
            vec![vec![0.0, 1.0, 1.0, 0.0]],
        )
        .unwrap();
        let expanded = PolynomialExpansion::new(2).expand(&data).unwrap();
        assert_eq!(expanded.covariate(0), expanded.covariate(1));
    }

    #[test]
    fn test_counterfactual_expansion_aligns() {
        let data = two_covariate_dataset();
        let expansion = PolynomialExpansion::new(2).with_treatment();
        let observed = expansion.expand(&data).unwrap();
        let forced = expansion.expand(&data.counterfactual(1).unwrap()).unwrap();
        assert_eq!(observed.n_covariates(), forced.n_covariates());
        // covariate-only terms are identical; treatment terms are forced
        assert_eq!(observed.covariate(1), forced.covariate(1));
        assert_eq!(forced.covariate(0), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_no_inputs_yields_no_terms() {
        let data = Dataset::new(vec![1.0, 2.0], vec![0, 1], vec![]).unwrap();
        let expanded = PolynomialExpansion::new(2).expand(&data).unwrap();
        assert_eq!(expanded.n_covariates(), 0);
    }

    #[test]
    fn test_multiset_enumeration() {
        assert_eq!(
            multisets(2, 2),
            vec![vec![0, 0], vec![0, 1], vec![1, 1]]
        );
        assert_eq!(
            multisets(3, 2),
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2]
            ]
        );
        assert!(multisets(0, 2).is_empty());
        assert_eq!(n_multisets(3, 2), 6);
        assert_eq!(n_multisets(2, 3), 4);
        assert_eq!(n_multisets(0, 2), 0);
    }

    #[test]
    fn test_expected_widths() {
        let expansion = PolynomialExpansion::new(2);
        // k inputs at degree 2: k + k(k+1)/2
        assert_eq!(expansion.output_width(1), 2);
        assert_eq!(expansion.output_width(2), 5);
        assert_eq!(expansion.output_width(3), 9);
        assert_eq!(PolynomialExpansion::new(0).output_width(3), 3);
    }

    #[test]
    fn test_interaction_values() {
        let data = Dataset::new(
            vec![0.0, 0.0],
            vec![0, 1],
            vec![vec![2.0, 3.0], vec![5.0, 7.0]],
        )
        .unwrap();
        let expanded = PolynomialExpansion::new(2).expand(&data).unwrap();
        let interaction = expanded.covariate(3);
        assert_relative_eq!(interaction[0], 10.0);
        assert_relative_eq!(interaction[1], 21.0);
    }

    proptest! {
        // the width formula agrees with the generated column count
        #[test]
        fn prop_output_width_matches_expansion(
            n_records in 1usize..12,
            n_covariates in 0usize..4,
            degree in 0usize..4,
            include_treatment in any::<bool>(),
        ) {
            let outcome: Vec<f64> = (0..n_records).map(|i| i as f64).collect();
            let treatment: Vec<u8> = (0..n_records).map(|i| (i % 2) as u8).collect();
            let covariates: Vec<Vec<f64>> = (0..n_covariates)
                .map(|c| (0..n_records).map(|i| (i + c) as f64 * 0.5 - 1.0).collect())
                .collect();
            let data = Dataset::new(outcome, treatment, covariates).unwrap();

            let mut expansion = PolynomialExpansion::new(degree);
            if include_treatment {
                expansion = expansion.with_treatment();
            }
            let n_inputs = n_covariates + usize::from(include_treatment);
            let expanded = expansion.expand(&data).unwrap();
            prop_assert_eq!(expanded.n_covariates(), expansion.output_width(n_inputs));
            prop_assert_eq!(expanded.len(), data.len());
        }
    }
}
