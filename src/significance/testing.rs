//! significance::testing — surrogate-driven significance of dDTF values.
//!
//! Purpose
//! -------
//! Decide which directed connections survive: run the connectivity
//! pipeline on every surrogate set to build a per-connection null
//! distribution of |dDTF| values, test the observed value of each
//! connection against its null with a one-sample t-test, and zero out the
//! connections that do not reach the significance level.
//!
//! For each pair (i, j) the null sample {|dDTF|ₛ(i, j)} is tested against
//! the fixed observed value D(i, j); the two-tailed p-value from the
//! Student-t CDF is halved to a one-tailed p-value, the mask is p < α,
//! and the pruned network is D ⊙ mask.
//!
//! Key behaviors
//! -------------
//! - Surrogate pipeline runs execute in parallel (rayon) and the batch
//!   aborts on the first failure; ill-conditioning reflects the input
//!   data, not one unlucky draw, and is never skipped silently.
//! - Null magnitudes are collected in ascending set order into
//!   preallocated, disjoint slots, so the result is independent of
//!   thread scheduling.
//! - A zero-variance null distribution for any pair surfaces as
//!   [`SigError::DegenerateNullDistribution`] naming the connection.
//!
//! Invariants & assumptions
//! ------------------------
//! - The surrogate tensor has shape (N, T, C) with N ≥ 2 and the same C
//!   as the observed dDTF matrix.
//! - Reported p-values lie in [0, 1]; `pruned == observed ⊙ mask` holds
//!   exactly.
//!
//! Conventions
//! -----------
//! - Row i is the target, column j the source, matching the dDTF
//!   orientation.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the one-tailed p-value on hand-checkable null
//!   samples, exercise the degenerate and validation branches, and run a
//!   small white-noise batch end to end for structural consistency.

use crate::pipeline::{ConnectivityPipeline, PipelineError};
use crate::significance::errors::{SigError, SigResult};
use crate::spectral::DDTFOutcome;
use ndarray::{Array2, Array3, Axis};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// SignificanceOutcome — p-values, mask, and pruned network.
///
/// Purpose
/// -------
/// Immutable result of the significance test: everything the reporting
/// layer needs about which connections survived.
///
/// Fields
/// ------
/// - `p_values`: `Array2<f64>`
///   One-tailed p-value per connection, each in [0, 1].
/// - `mask`: `Array2<bool>`
///   `p < α` per connection.
/// - `pruned`: `Array2<f64>`
///   Observed |dDTF| where significant, 0 elsewhere.
/// - `observed`: `Array2<f64>`
///   The unpruned observed |dDTF| matrix.
///
/// Invariants
/// ----------
/// - `pruned[[i, j]] == observed[[i, j]]` exactly where `mask[[i, j]]`,
///   and 0 elsewhere.
#[derive(Debug, Clone)]
pub struct SignificanceOutcome {
    p_values: Array2<f64>,
    mask: Array2<bool>,
    pruned: Array2<f64>,
    observed: Array2<f64>,
}

impl SignificanceOutcome {
    /// Test every connection of the observed dDTF against its surrogate
    /// null distribution.
    ///
    /// Parameters
    /// ----------
    /// - `pipeline`: `&ConnectivityPipeline`
    ///   The fixed configuration shared by the original run and all
    ///   surrogate runs.
    /// - `observed`: `&DDTFOutcome`
    ///   The dDTF outputs of the original series.
    /// - `surrogates`: `&Array3<f64>`
    ///   Surrogate tensor of shape (N, T, C) with N ≥ 2.
    /// - `alpha`: `f64`
    ///   Significance level, strictly in (0, 1).
    ///
    /// Returns
    /// -------
    /// `SigResult<SignificanceOutcome>`
    ///   The test outcome, or the first failure.
    ///
    /// Errors
    /// ------
    /// - `SigError::InvalidAlpha(alpha)` when α ∉ (0, 1).
    /// - `SigError::InsufficientSurrogates(n)` when N < 2.
    /// - `SigError::Pipeline(..)` when any surrogate pipeline run fails;
    ///   the batch aborts on the first failure.
    /// - `SigError::DegenerateNullDistribution { .. }` when a pair's null
    ///   sample has zero variance.
    ///
    /// Notes
    /// -----
    /// - The one-tailed p-value is obtained by halving the two-tailed
    ///   Student-t probability, testing whether the observed value
    ///   exceeds the null mean.
    pub fn from_surrogates(
        pipeline: &ConnectivityPipeline, observed: &DDTFOutcome, surrogates: &Array3<f64>,
        alpha: f64,
    ) -> SigResult<SignificanceOutcome> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(SigError::InvalidAlpha(alpha));
        }
        let num_sets = surrogates.dim().0;
        if num_sets < 2 {
            return Err(SigError::InsufficientSurrogates(num_sets));
        }

        // One pipeline run per surrogate set; abort the batch on the
        // first failure.
        let null_magnitudes: Vec<Array2<f64>> = (0..num_sets)
            .into_par_iter()
            .map(|set| -> Result<Array2<f64>, PipelineError> {
                let series = surrogates.index_axis(Axis(0), set);
                Ok(pipeline.run(series)?.ddtf().magnitude().clone())
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        let observed_magnitude = observed.magnitude().clone();
        let channels = observed_magnitude.dim().0;

        let mut p_values = Array2::<f64>::zeros((channels, channels));
        let mut draws = vec![0.0_f64; num_sets];
        for i in 0..channels {
            for j in 0..channels {
                for (set, magnitudes) in null_magnitudes.iter().enumerate() {
                    draws[set] = magnitudes[[i, j]];
                }
                p_values[[i, j]] =
                    calc_one_tailed_p(&draws, observed_magnitude[[i, j]], i, j)?;
            }
        }

        let mask = p_values.mapv(|p| p < alpha);
        let mut pruned = observed_magnitude.clone();
        for ((i, j), keep) in mask.indexed_iter() {
            if !*keep {
                pruned[[i, j]] = 0.0;
            }
        }

        Ok(SignificanceOutcome { p_values, mask, pruned, observed: observed_magnitude })
    }

    /// One-tailed p-value per connection.
    pub fn p_values(&self) -> &Array2<f64> {
        &self.p_values
    }

    /// Significance mask (`p < α`).
    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    /// Observed |dDTF| with non-significant entries zeroed.
    pub fn pruned(&self) -> &Array2<f64> {
        &self.pruned
    }

    /// The unpruned observed |dDTF| matrix.
    pub fn observed(&self) -> &Array2<f64> {
        &self.observed
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// One-sample t-test of the null draws against the observed value,
/// returning the halved (one-tailed) p-value. The sample variance uses
/// the unbiased (1/(n−1)) denominator; zero variance is the degenerate
/// case reported with the connection indices.
fn calc_one_tailed_p(draws: &[f64], observed: f64, target: usize, source: usize) -> SigResult<f64> {
    let n = draws.len() as f64;
    let mean = draws.iter().sum::<f64>() / n;
    let variance = draws.iter().map(|&d| (d - mean).powi(2)).sum::<f64>() / (n - 1.0);
    if variance == 0.0 {
        return Err(SigError::DegenerateNullDistribution { target, source });
    }

    let standard_error = (variance / n).sqrt();
    let t_statistic = (mean - observed) / standard_error;

    let dist = StudentsT::new(0.0, 1.0, n - 1.0).expect("freedom ≥ 1");
    let two_tailed = 2.0 * (1.0 - dist.cdf(t_statistic.abs()));
    Ok(two_tailed / 2.0)
}
