//! spectral::coherence — cofactor-based partial coherence.
//!
//! Purpose
//! -------
//! Compute the partial-coherence tensor θ(f) from the cross-spectral
//! density. For each slice the cofactor (adjugate) matrix is formed as
//!
//! ```text
//! cof(f) = inverse(S(f))ᵀ · det(S(f))
//! θ_ij(f) = cof_ij(f)² / (cof_ii(f) · cof_jj(f))
//! ```
//!
//! and the full frequency-stacked tensor is then normalized: real and
//! imaginary parts are offset by their respective minima, the result is
//! divided by its maximum magnitude, and the magnitude is taken — so the
//! stored θ values lie in [0, 1]. The cofactor matrix is the one place in
//! the crate where an inverse-plus-determinant product is required output
//! rather than a solver implementation detail.
//!
//! Key behaviors
//! -------------
//! - Per-slice inversion and determinant via the dense complex LU
//!   helpers; singularity or a vanishing diagonal cofactor surfaces as
//!   [`SpectralError::SingularSpectralMatrix`] with the slice index.
//! - Tensor-wide normalization (not per slice), matching the dDTF
//!   weighting of Liu et al. (2012).
//!
//! Invariants & assumptions
//! ------------------------
//! - Input slices are Hermitian C×C matrices from
//!   [`SpectralDensity`](crate::spectral::density::SpectralDensity).
//! - Stored θ values are finite and lie in [0, 1].
//!
//! Testing notes
//! -------------
//! - Unit tests pin the cofactor ratio on a hand-computed diagonal slice,
//!   assert the [0, 1] range and the attained maximum after
//!   normalization, and check the singular-slice error path.

use crate::spectral::density::SpectralDensity;
use crate::spectral::errors::{SpectralError, SpectralResult};
use crate::spectral::linalg::{determinant, invert_slice};
use ndarray::{Array2, Array3, ArrayView2, s};
use num_complex::Complex64;

/// PartialCoherence — normalized θ(f) magnitudes in [0, 1].
///
/// Purpose
/// -------
/// Hold the frequency-major partial-coherence tensor consumed by the dDTF
/// aggregation. Built by [`PartialCoherence::from_spectral_density`] and
/// immutable afterwards.
///
/// Fields
/// ------
/// - `theta`: `Array3<f64>`
///   Normalized magnitudes, shape (F, C, C), each in [0, 1].
///
/// Invariants
/// ----------
/// - Unless the offset tensor is identically zero, at least one entry
///   attains 1.0 (the normalization divides by the maximum magnitude).
#[derive(Debug, Clone)]
pub struct PartialCoherence {
    theta: Array3<f64>,
}

impl PartialCoherence {
    /// Compute θ(f) for every slice of the cross-spectral density.
    ///
    /// Parameters
    /// ----------
    /// - `density`: `&SpectralDensity`
    ///   Cross-spectral density slices S(f).
    ///
    /// Returns
    /// -------
    /// `SpectralResult<PartialCoherence>`
    ///   The normalized tensor, or the first degenerate slice.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::SingularSpectralMatrix(f)` when S(f) is not
    ///   invertible at grid index `f`, or when a diagonal cofactor
    ///   vanishes there so the ratio is undefined.
    ///
    /// Notes
    /// -----
    /// - Normalization is applied across the entire frequency-stacked
    ///   tensor at once; per-slice normalization would change the dDTF
    ///   weighting.
    pub fn from_spectral_density(density: &SpectralDensity) -> SpectralResult<PartialCoherence> {
        let (f_count, channels, _) = density.s_f().dim();

        let mut raw = Array3::<Complex64>::zeros((f_count, channels, channels));
        for fi in 0..f_count {
            let slice = density.s_f().slice(s![fi, .., ..]);
            let theta_slice = calc_theta_slice(slice, fi)?;
            raw.slice_mut(s![fi, .., ..]).assign(&theta_slice);
        }

        Ok(PartialCoherence { theta: normalize_magnitudes(&raw) })
    }

    /// Normalized θ tensor, shape (F, C, C).
    pub fn theta(&self) -> &Array3<f64> {
        &self.theta
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Cofactor ratio for one slice: cof = inverse(S)ᵀ·det(S), then
/// θ_ij = cof_ij² / (cof_ii·cof_jj). Errors carry the grid index.
fn calc_theta_slice(
    slice: ArrayView2<Complex64>, frequency_index: usize,
) -> SpectralResult<Array2<Complex64>> {
    let channels = slice.ncols();
    let inverse = invert_slice(slice)
        .ok_or(SpectralError::SingularSpectralMatrix(frequency_index))?;
    let det = determinant(slice);

    let mut cof = Array2::<Complex64>::zeros((channels, channels));
    for i in 0..channels {
        for j in 0..channels {
            cof[[i, j]] = inverse[[j, i]] * det;
        }
    }

    for i in 0..channels {
        if cof[[i, i]].norm() == 0.0 {
            return Err(SpectralError::SingularSpectralMatrix(frequency_index));
        }
    }

    let mut theta = Array2::<Complex64>::zeros((channels, channels));
    for i in 0..channels {
        for j in 0..channels {
            theta[[i, j]] = cof[[i, j]] * cof[[i, j]] / (cof[[i, i]] * cof[[j, j]]);
        }
    }
    Ok(theta)
}

/// Tensor-wide normalization: offset real/imaginary parts by their
/// minima, divide by the maximum magnitude, take the magnitude. An
/// all-zero offset tensor maps to all zeros.
fn normalize_magnitudes(raw: &Array3<Complex64>) -> Array3<f64> {
    let min_re = raw.iter().map(|z| z.re).fold(f64::INFINITY, f64::min);
    let min_im = raw.iter().map(|z| z.im).fold(f64::INFINITY, f64::min);
    let offset = Complex64::new(min_re, min_im);

    let shifted = raw.mapv(|z| z - offset);
    let max_norm = shifted.iter().map(|z| z.norm()).fold(0.0, f64::max);
    if max_norm == 0.0 {
        return Array3::<f64>::zeros(raw.dim());
    }
    shifted.mapv(|z| z.norm() / max_norm)
}
