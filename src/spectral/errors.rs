//! spectral::errors — error types for the frequency-domain stages.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the frequency grid,
//! transfer-function, spectral-density, and partial-coherence modules.
//! Every numerical failure carries the offending frequency index so a
//! caller can locate the degenerate slice directly.
//!
//! Key behaviors
//! -------------
//! - Define [`SpectralResult`] and [`SpectralError`] for the `spectral`
//!   subtree.
//! - Surface singular per-frequency matrices and degenerate residual
//!   variance as structured errors; Inf/NaN never leak into tensors.
//! - Map every variant to `PyValueError` at the Python boundary when the
//!   `python-bindings` feature is enabled.
//!
//! Conventions
//! -----------
//! - Variants are grouped by failure taxonomy: input validation first,
//!   numerical instability second.
//! - The frequency index payload refers to the position in the
//!   [`FrequencyGrid`](crate::spectral::grid::FrequencyGrid), not a
//!   physical frequency value.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding; the numerical variants
//!   are exercised where they are raised (transfer, density, coherence).

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SpectralResult<T> = Result<T, SpectralError>;

/// SpectralError — failure conditions for the frequency-domain stages.
///
/// Variants
/// --------
/// - `InvalidFrequencyBand { lo, hi }`
///   The band limits are non-finite or reversed (`lo > hi`).
/// - `InvalidFrequencyCount(count)`
///   The grid would contain zero frequencies.
/// - `SingularTransferMatrix(frequency_index)`
///   A(f) is not invertible at the given grid index, so H(f) = A(f)⁻¹
///   does not exist.
/// - `DegenerateResidualVariance(frequency_index)`
///   The pooled residual variance V(f) is exactly zero at the given grid
///   index.
/// - `SingularSpectralMatrix(frequency_index)`
///   S(f) is not invertible (or a diagonal cofactor vanishes) at the
///   given grid index, so partial coherence is undefined.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`]; converted
///   to `PyValueError` at the Python boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectralError {
    //------ Input validation errors ------
    InvalidFrequencyBand { lo: f64, hi: f64 },
    InvalidFrequencyCount(usize),
    //------ Numerical instability errors ------
    SingularTransferMatrix(usize),
    DegenerateResidualVariance(usize),
    SingularSpectralMatrix(usize),
}

impl std::error::Error for SpectralError {}

impl std::fmt::Display for SpectralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralError::InvalidFrequencyBand { lo, hi } => {
                write!(f, "Invalid frequency band [{lo}, {hi}]. Limits must be finite with lo ≤ hi.")
            }
            SpectralError::InvalidFrequencyCount(count) => {
                write!(f, "Invalid frequency count: {count}. Must be at least 1.")
            }
            SpectralError::SingularTransferMatrix(index) => {
                write!(f, "A(f) is singular at frequency index {index}; H(f) = A(f)⁻¹ undefined.")
            }
            SpectralError::DegenerateResidualVariance(index) => {
                write!(f, "Residual variance V(f) is zero at frequency index {index}.")
            }
            SpectralError::SingularSpectralMatrix(index) => {
                write!(f, "S(f) is singular at frequency index {index}; partial coherence undefined.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SpectralError> for PyErr {
    fn from(err: SpectralError) -> PyErr {
        PyValueError::new_err(format!("SpectralError: {err}"))
    }
}
