//! spectral::density — residual variance and cross-spectral density.
//!
//! Purpose
//! -------
//! Derive the per-frequency noise scale V(f) from the VAR residuals and
//! combine it with the transfer slices into the cross-spectral density
//!
//! ```text
//! S_ij(f) = H_ij(f) · V(f) · H^H_ij(f)
//! ```
//!
//! The residual spectrum is treated as constant across the analyzed band:
//! each residual channel is transformed once over its full length
//! (rustfft) and the complex variance of all spectral coefficients is
//! pooled into a single scalar that every slice shares. The product
//! above is entrywise, following the dDTF construction of Liu et al.
//! (2012), whose partial-coherence cofactors operate on these per-entry
//! products; S(f) is Hermitian because V(f) is real.
//!
//! Key behaviors
//! -------------
//! - One forward DFT per residual channel, pooled complex variance over
//!   all (sample, channel) coefficients.
//! - Broadcast of the pooled variance to every grid slice, with the
//!   degenerate V(f) = 0 case surfaced at the first offending index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residuals come from a successful VAR fit: finite, (T−p) × C with at
//!   least one row.
//! - The produced S(f) slices are Hermitian up to numerical precision.
//!
//! Testing notes
//! -------------
//! - Unit tests assert Hermitian symmetry of S(f), constancy of V across
//!   slices, and the degenerate-variance error on all-zero residuals.

use crate::spectral::errors::{SpectralError, SpectralResult};
use crate::spectral::grid::FrequencyGrid;
use crate::spectral::transfer::TransferFunctions;
use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;
use rustfft::FftPlanner;

/// SpectralDensity — pooled residual variance and S(f) slices.
///
/// Purpose
/// -------
/// Hold V(f) and the cross-spectral density tensor for one pipeline run.
/// Built by [`SpectralDensity::build`] and immutable afterwards.
///
/// Fields
/// ------
/// - `variances`: `Array1<f64>`
///   V(f) per grid index; constant across the band by construction.
/// - `s_f`: `Array3<Complex64>`
///   Cross-spectral density slices, shape (F, C, C).
///
/// Invariants
/// ----------
/// - `variances[f] > 0` for all f (zero variance aborts construction).
/// - Every `s_f` slice is Hermitian up to numerical precision.
#[derive(Debug, Clone)]
pub struct SpectralDensity {
    variances: Array1<f64>,
    s_f: Array3<Complex64>,
}

impl SpectralDensity {
    /// Build V(f) and S(f) from residuals and transfer slices.
    ///
    /// Parameters
    /// ----------
    /// - `residuals`: `&Array2<f64>`
    ///   Residual matrix ((T−p) × C) from the VAR fit.
    /// - `transfer`: `&TransferFunctions`
    ///   Per-frequency H(f) and H^H(f) slices.
    /// - `grid`: `&FrequencyGrid`
    ///   The analyzed frequency axis; determines the number of slices.
    ///
    /// Returns
    /// -------
    /// `SpectralResult<SpectralDensity>`
    ///   The variance vector and density tensor, or the degenerate slice.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::DegenerateResidualVariance(f)` when V(f) = 0 at
    ///   grid index `f` (all slices share the pooled value, so the first
    ///   index is reported).
    ///
    /// Notes
    /// -----
    /// - The pooled variance is the complex variance
    ///   mean(|z − mean(z)|²) over every spectral coefficient of every
    ///   channel; it is real and nonnegative by construction.
    pub fn build(
        residuals: &Array2<f64>, transfer: &TransferFunctions, grid: &FrequencyGrid,
    ) -> SpectralResult<SpectralDensity> {
        let spectrum = calc_residual_spectrum(residuals);
        let pooled = calc_complex_variance(&spectrum);

        let f_count = grid.len();
        let variances = Array1::from_elem(f_count, pooled);
        for (fi, &v) in variances.iter().enumerate() {
            if v == 0.0 {
                return Err(SpectralError::DegenerateResidualVariance(fi));
            }
        }

        let channels = transfer.channels();
        let mut s_f = Array3::<Complex64>::zeros((f_count, channels, channels));
        for fi in 0..f_count {
            for i in 0..channels {
                for j in 0..channels {
                    s_f[[fi, i, j]] = (transfer.h_f()[[fi, i, j]]
                        * transfer.h_conj()[[fi, i, j]])
                    .scale(variances[fi]);
                }
            }
        }

        Ok(SpectralDensity { variances, s_f })
    }

    /// V(f) per grid index.
    pub fn variances(&self) -> &Array1<f64> {
        &self.variances
    }

    /// Cross-spectral density tensor, shape (F, C, C).
    pub fn s_f(&self) -> &Array3<Complex64> {
        &self.s_f
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Forward DFT of every residual channel over its full length; output is
/// rows × channels, column `c` holding the spectrum of channel `c`.
fn calc_residual_spectrum(residuals: &Array2<f64>) -> Array2<Complex64> {
    let (rows, channels) = residuals.dim();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(rows);

    let mut spectrum = Array2::<Complex64>::zeros((rows, channels));
    for c in 0..channels {
        let mut buffer: Vec<Complex64> =
            (0..rows).map(|t| Complex64::new(residuals[[t, c]], 0.0)).collect();
        fft.process(&mut buffer);
        for (t, value) in buffer.into_iter().enumerate() {
            spectrum[[t, c]] = value;
        }
    }
    spectrum
}

/// Pooled complex variance mean(|z − mean(z)|²) over all entries.
fn calc_complex_variance(spectrum: &Array2<Complex64>) -> f64 {
    let count = spectrum.len();
    if count == 0 {
        return 0.0;
    }
    let mean = spectrum.iter().sum::<Complex64>().unscale(count as f64);
    spectrum.iter().map(|z| (z - mean).norm_sqr()).sum::<f64>() / count as f64
}
