//! spectral::ddtf — dDTF aggregation and degree measures.
//!
//! Purpose
//! -------
//! Aggregate the direct Directed Transfer Function over the frequency
//! grid,
//!
//! ```text
//! dDTF_ij = ∑_f H_ij(f) · θ_ij(f)
//! ```
//!
//! and derive the magnitude matrix and the in/out/in+out degree vectors
//! used for reporting and significance thresholding. The sum runs in
//! ascending frequency-index order so the floating-point reduction is
//! bit-reproducible.
//!
//! Conventions
//! -----------
//! - `dDTF[[i, j]]` measures direct flow from channel `j` to channel `i`,
//!   matching the H(f) orientation from the transfer stage.
//! - in-degree = row sums of |dDTF|, out-degree = column sums, in+out =
//!   their elementwise sum.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the aggregation on a single-slice tensor with unit
//!   coherence (dDTF == H) and assert the degree identity.

use crate::spectral::coherence::PartialCoherence;
use crate::spectral::transfer::TransferFunctions;
use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;

/// DDTFOutcome — aggregated dDTF matrix, magnitudes, and degrees.
///
/// Purpose
/// -------
/// Immutable result record of the dDTF stage of one pipeline run. The
/// magnitude matrix feeds the significance tester; the degree vectors are
/// reporting outputs.
///
/// Fields
/// ------
/// - `ddtf`: `Array2<Complex64>`
///   Complex C×C aggregate ∑_f H_ij(f)·θ_ij(f).
/// - `magnitude`: `Array2<f64>`
///   |dDTF| entrywise.
/// - `in_degree`, `out_degree`, `in_and_out`: `Array1<f64>`
///   Row sums, column sums, and their sum of the magnitude matrix.
///
/// Invariants
/// ----------
/// - `in_and_out == in_degree + out_degree` elementwise by construction.
/// - All values finite whenever the upstream stages succeeded.
#[derive(Debug, Clone)]
pub struct DDTFOutcome {
    ddtf: Array2<Complex64>,
    magnitude: Array2<f64>,
    in_degree: Array1<f64>,
    out_degree: Array1<f64>,
    in_and_out: Array1<f64>,
}

impl DDTFOutcome {
    /// Aggregate dDTF over the grid and derive magnitudes and degrees.
    ///
    /// Parameters
    /// ----------
    /// - `transfer`: `&TransferFunctions`
    ///   Per-frequency H(f) slices.
    /// - `coherence`: `&PartialCoherence`
    ///   Normalized θ(f) magnitudes in [0, 1].
    ///
    /// Returns
    /// -------
    /// `DDTFOutcome`
    ///   The aggregated matrices and degree vectors. This stage cannot
    ///   fail: both inputs are finite by their own invariants.
    ///
    /// Notes
    /// -----
    /// - Frequencies are summed in ascending index order; do not reorder
    ///   the reduction.
    pub fn aggregate(transfer: &TransferFunctions, coherence: &PartialCoherence) -> DDTFOutcome {
        let f_count = transfer.len();
        let channels = transfer.channels();

        let mut ddtf = Array2::<Complex64>::zeros((channels, channels));
        for fi in 0..f_count {
            for i in 0..channels {
                for j in 0..channels {
                    ddtf[[i, j]] +=
                        transfer.h_f()[[fi, i, j]].scale(coherence.theta()[[fi, i, j]]);
                }
            }
        }

        let magnitude = ddtf.mapv(|z| z.norm());
        let in_degree = magnitude.sum_axis(Axis(1));
        let out_degree = magnitude.sum_axis(Axis(0));
        let in_and_out = &in_degree + &out_degree;

        DDTFOutcome { ddtf, magnitude, in_degree, out_degree, in_and_out }
    }

    /// Complex dDTF matrix, shape (C, C).
    pub fn ddtf(&self) -> &Array2<Complex64> {
        &self.ddtf
    }

    /// |dDTF| matrix, shape (C, C).
    pub fn magnitude(&self) -> &Array2<f64> {
        &self.magnitude
    }

    /// Row sums of |dDTF|.
    pub fn in_degree(&self) -> &Array1<f64> {
        &self.in_degree
    }

    /// Column sums of |dDTF|.
    pub fn out_degree(&self) -> &Array1<f64> {
        &self.out_degree
    }

    /// Elementwise sum of in-degree and out-degree.
    pub fn in_and_out(&self) -> &Array1<f64> {
        &self.in_and_out
    }
}
