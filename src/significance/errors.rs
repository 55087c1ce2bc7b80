//! significance::errors — error types for significance testing.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the surrogate-driven
//! significance test. Statistical degeneracy (a zero-variance null
//! distribution) lives here; numerical failures inside surrogate pipeline
//! runs are wrapped so the whole batch aborts on the first one.
//!
//! Key behaviors
//! -------------
//! - Define [`SigResult`] and [`SigError`] for the `significance`
//!   subtree.
//! - Wrap [`PipelineError`] via `From` so a failing surrogate run
//!   propagates with `?` and aborts the batch — ill-conditioning reflects
//!   the input data, not one unlucky draw, so skipping sets silently is
//!   not an option.
//!
//! Conventions
//! -----------
//! - The degenerate-null payload names the connection by (target, source)
//!   channel indices, matching the row/column orientation of the dDTF
//!   matrix.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding and the `From`
//!   wrapping.

use crate::pipeline::PipelineError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SigResult<T> = Result<T, SigError>;

/// SigError — failure conditions for the significance test.
///
/// Variants
/// --------
/// - `InvalidAlpha(alpha)`
///   The significance level is outside (0, 1).
/// - `InsufficientSurrogates(count)`
///   Fewer than two surrogate sets; a t-test needs at least one degree
///   of freedom.
/// - `DegenerateNullDistribution { target, source }`
///   The null distribution for connection source→target has zero
///   variance, so the t statistic is undefined.
/// - `Pipeline(PipelineError)`
///   A surrogate pipeline run failed; the batch is aborted.
#[derive(Debug, Clone, PartialEq)]
pub enum SigError {
    //------ Input validation errors ------
    InvalidAlpha(f64),
    InsufficientSurrogates(usize),
    //------ Statistical degeneracy errors ------
    DegenerateNullDistribution { target: usize, source: usize },
    //------ Wrapped pipeline failures ------
    Pipeline(PipelineError),
}

impl std::error::Error for SigError {}

impl std::fmt::Display for SigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigError::InvalidAlpha(alpha) => {
                write!(f, "Invalid significance level: {alpha}. Must lie strictly in (0, 1).")
            }
            SigError::InsufficientSurrogates(count) => {
                write!(f, "Insufficient surrogate sets: {count}. Need at least 2 for a t-test.")
            }
            SigError::DegenerateNullDistribution { target, source } => {
                write!(
                    f,
                    "Null distribution for connection {source}→{target} has zero variance."
                )
            }
            SigError::Pipeline(err) => write!(f, "surrogate pipeline run failed: {err}"),
        }
    }
}

impl From<PipelineError> for SigError {
    fn from(err: PipelineError) -> SigError {
        SigError::Pipeline(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<SigError> for PyErr {
    fn from(err: SigError) -> PyErr {
        PyValueError::new_err(format!("SigError: {err}"))
    }
}
