//! var::errors — error types for VAR model fitting.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the VAR fitting
//! routines and their input validation helpers. Shape violations,
//! non-finite data, degenerate channels, and singular normal equations are
//! all reported through [`VARError`] so that callers can fail fast with a
//! precise diagnosis instead of propagating NaN into the frequency-domain
//! stages.
//!
//! Key behaviors
//! -------------
//! - Define [`VARResult`] and [`VARError`] as the canonical result and
//!   error types for the `var` subtree.
//! - Attach human-readable `Display` messages to each variant, phrased in
//!   terms of domain constraints (sample counts, model order, channel
//!   indices).
//! - Map every variant to `PyValueError` at the Python boundary when the
//!   `python-bindings` feature is enabled.
//!
//! Conventions
//! -----------
//! - Variants are grouped by the failure taxonomy: input validation first,
//!   numerical instability second. Statistical degeneracy has no
//!   representative here; it belongs to the significance subtree.
//! - Each variant carries just enough payload (offending value, channel
//!   index, required sample count) for logging and debugging.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages are non-empty and embed the
//!   variant payloads.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type VARResult<T> = Result<T, VARError>;

/// VARError — failure conditions for VAR model fitting.
///
/// Variants
/// --------
/// - `EmptySeries`
///   The input matrix has no samples or no channels.
/// - `InsufficientData { samples, required }`
///   The sample count does not exceed `order × channels`, so the
///   least-squares problem is rank-deficient by construction.
/// - `InvalidOrder(order)`
///   The requested model order is zero.
/// - `NonFiniteValue(value)`
///   A data element is NaN or ±∞.
/// - `ZeroVarianceChannel(channel)`
///   A channel is constant, so its residual spectrum would be degenerate
///   downstream.
/// - `SingularLagCovariance`
///   The lag-covariance (normal-equation) matrix is numerically singular
///   and the least-squares solve failed.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
/// - Converted to `PyValueError` at the Python boundary, preserving the
///   `Display` message.
#[derive(Debug, Clone, PartialEq)]
pub enum VARError {
    //------ Input validation errors ------
    EmptySeries,
    InsufficientData { samples: usize, required: usize },
    InvalidOrder(usize),
    NonFiniteValue(f64),
    ZeroVarianceChannel(usize),
    //------ Numerical instability errors ------
    SingularLagCovariance,
}

impl std::error::Error for VARError {}

impl std::fmt::Display for VARError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VARError::EmptySeries => {
                write!(f, "Input series is empty. Need at least one sample and one channel.")
            }
            VARError::InsufficientData { samples, required } => {
                write!(
                    f,
                    "Insufficient data: {samples} samples. Need more than {required} \
                     (order × channels) samples for a well-posed fit."
                )
            }
            VARError::InvalidOrder(order) => {
                write!(f, "Invalid model order: {order}. Must be at least 1.")
            }
            VARError::NonFiniteValue(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            VARError::ZeroVarianceChannel(channel) => {
                write!(f, "Channel {channel} has zero variance. Constant channels cannot be fit.")
            }
            VARError::SingularLagCovariance => {
                write!(f, "Lag-covariance matrix is numerically singular; cannot solve for \
                           the VAR coefficients.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<VARError> for PyErr {
    fn from(err: VARError) -> PyErr {
        PyValueError::new_err(format!("VARError: {err}"))
    }
}
