//! spectral::grid — the analyzed frequency grid.
//!
//! Purpose
//! -------
//! Represent the F linearly spaced frequencies in [f_lo, f_hi] that every
//! frequency-domain stage of one pipeline run shares read-only. The grid
//! is created once per pipeline configuration and reused across all N+1
//! runs of a significance analysis.
//!
//! Conventions
//! -----------
//! - Frequencies are in cycles per sample (the sampling rate is absorbed
//!   upstream), ascending, with index 0 at f_lo.
//! - A single-point grid collapses to [f_lo].
//!
//! Testing notes
//! -------------
//! - Unit tests cover spacing, endpoints, and validation branches.

use crate::spectral::errors::{SpectralError, SpectralResult};
use ndarray::Array1;

/// FrequencyGrid — F frequencies linearly spaced in [f_lo, f_hi].
///
/// Purpose
/// -------
/// Shared read-only frequency axis for the transfer-function, spectral-
/// density, and coherence stages. Construction validates the band and the
/// point count; afterwards the grid is immutable.
///
/// Fields
/// ------
/// - `frequencies`: `Array1<f64>`
///   Ascending frequency values; `frequencies[0] == f_lo` and
///   `frequencies[F−1] == f_hi` (for F ≥ 2).
///
/// Invariants
/// ----------
/// - Non-empty, finite, ascending.
///
/// Performance
/// -----------
/// - One allocation of F values at construction; all accessors are O(1)
///   or return views.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    frequencies: Array1<f64>,
}

impl FrequencyGrid {
    /// Build a grid of `count` frequencies linearly spaced in [lo, hi].
    ///
    /// Parameters
    /// ----------
    /// - `lo`, `hi`: `f64`
    ///   Band limits in cycles per sample; must be finite with `lo ≤ hi`.
    /// - `count`: `usize`
    ///   Number of grid points F ≥ 1.
    ///
    /// Returns
    /// -------
    /// `SpectralResult<FrequencyGrid>`
    ///   The validated grid, or a `SpectralError` for an invalid band or
    ///   count.
    ///
    /// Errors
    /// ------
    /// - `SpectralError::InvalidFrequencyBand { lo, hi }` for non-finite
    ///   or reversed limits.
    /// - `SpectralError::InvalidFrequencyCount(0)` for an empty grid.
    pub fn new(lo: f64, hi: f64, count: usize) -> SpectralResult<FrequencyGrid> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SpectralError::InvalidFrequencyBand { lo, hi });
        }
        if count == 0 {
            return Err(SpectralError::InvalidFrequencyCount(count));
        }
        Ok(FrequencyGrid { frequencies: Array1::linspace(lo, hi, count) })
    }

    /// Number of grid points F.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the grid holds no frequencies (never, post-validation).
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency value at grid index `index`.
    pub fn frequency(&self, index: usize) -> f64 {
        self.frequencies[index]
    }

    /// The full ascending frequency axis.
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }
}
