//! surrogate::errors — error types for surrogate generation.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the phase-randomization
//! generator. Only input validation can fail here; the generation itself
//! is deterministic given a seed and cannot degenerate.
//!
//! Conventions
//! -----------
//! - Variants mirror the input-validation taxonomy used across the crate;
//!   the Python boundary maps them to `PyValueError`.
//!
//! Testing notes
//! -------------
//! - Unit tests verify `Display` payload embedding.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type SurrogateResult<T> = Result<T, SurrogateError>;

/// SurrogateError — failure conditions for surrogate generation.
///
/// Variants
/// --------
/// - `EmptySeries`
///   The input matrix has no samples or no channels.
/// - `NonFiniteValue(value)`
///   A data element is NaN or ±∞.
/// - `ZeroSets`
///   The requested surrogate-set count is zero.
#[derive(Debug, Clone, PartialEq)]
pub enum SurrogateError {
    //------ Input validation errors ------
    EmptySeries,
    NonFiniteValue(f64),
    ZeroSets,
}

impl std::error::Error for SurrogateError {}

impl std::fmt::Display for SurrogateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurrogateError::EmptySeries => {
                write!(f, "Input series is empty. Need at least one sample and one channel.")
            }
            SurrogateError::NonFiniteValue(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            SurrogateError::ZeroSets => {
                write!(f, "Surrogate-set count must be at least 1.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<SurrogateError> for PyErr {
    fn from(err: SurrogateError) -> PyErr {
        PyValueError::new_err(format!("SurrogateError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for SurrogateError variants.
    //
    // They intentionally DO NOT cover:
    // - The validation logic that raises them, tested in
    //   `surrogate::generator`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify each variant produces a non-empty message and embeds its
    // payload where present.
    //
    // Given
    // -----
    // - One value of each variant.
    //
    // Expect
    // ------
    // - Non-empty messages; the NonFiniteValue message contains "inf".
    fn surrogate_error_display_messages_are_informative() {
        // Arrange
        let errors =
            vec![SurrogateError::EmptySeries, SurrogateError::ZeroSets];

        // Act & Assert
        for err in errors {
            assert!(!err.to_string().trim().is_empty());
        }
        assert!(SurrogateError::NonFiniteValue(f64::INFINITY).to_string().contains("inf"));
    }
}
