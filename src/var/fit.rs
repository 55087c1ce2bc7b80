//! var::fit — least-squares estimation of VAR(p) models.
//!
//! Purpose
//! -------
//! Fit the multivariate autoregression
//!
//! ```text
//! X(t) = ∑_{n=1}^{p} A(n)·X(t−n) + E(t)
//! ```
//!
//! by ordinary least squares on the lag-stacked regressor matrix and
//! recover both the coefficient tensor A (p × C × C) and the residual
//! matrix E ((T−p) × C). The fit is the entry stage of the connectivity
//! pipeline; everything downstream (frequency transform, spectral density,
//! partial coherence) consumes its outputs read-only.
//!
//! Key behaviors
//! -------------
//! - Build the (T−p) × (p·C) regressor matrix of lagged observations and
//!   solve the normal equations with a dense LU factorization.
//! - Recompute residuals by re-evaluating the fitted model on the lagged
//!   data and subtracting the prediction, rather than reusing solver
//!   by-products.
//! - Report a singular lag-covariance matrix as a structured error rather
//!   than returning a garbage solution.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is validated by [`validate_series`] before any allocation:
//!   `order ≥ 1`, `samples > order × channels`, finite values, no constant
//!   channel.
//! - The fit carries no intercept term; series are assumed centred
//!   upstream.
//! - A fitted [`VARModel`] is immutable; accessors expose views only.
//!
//! Conventions
//! -----------
//! - Rows index time, columns index channels, matching the rest of the
//!   crate.
//! - `coefficients[[n−1, i, j]]` is the weight of channel `j` at lag `n`
//!   in the prediction of channel `i`.
//! - The `ndarray` → `nalgebra` boundary is crossed only inside this
//!   module; callers never see `DMatrix` types.
//!
//! Downstream usage
//! ----------------
//! - `pipeline` calls [`VARModel::fit`] once per series (original or
//!   surrogate) and hands `coefficients()` to the frequency-domain
//!   transformer and `residuals()` to the spectral-density builder.
//!
//! Testing notes
//! -------------
//! - Unit tests check coefficient recovery on a simulated VAR(1) process,
//!   residual dimensions, higher-order coefficient layout, and surfacing
//!   of `SingularLagCovariance` for linearly dependent channels.

use crate::var::errors::{VARError, VARResult};
use crate::var::validation::validate_series;
use nalgebra::DMatrix;
use ndarray::{Array2, Array3, ArrayView2};

/// VARModel — fitted vector-autoregressive model.
///
/// Purpose
/// -------
/// Hold the coefficient tensor and residual matrix of a single VAR(p) fit.
/// The value is created fully computed by [`VARModel::fit`] and never
/// mutated afterwards; one pipeline run owns exactly one `VARModel`.
///
/// Fields
/// ------
/// - `order`: `usize`
///   Model order p (≥ 1).
/// - `coefficients`: `Array3<f64>`
///   Coefficient tensor of shape (p, C, C); `[[n−1, i, j]]` weights
///   channel `j` at lag `n` in the prediction of channel `i`.
/// - `residuals`: `Array2<f64>`
///   Residual matrix of shape (T−p, C): observation minus model
///   prediction for every usable time step.
///
/// Invariants
/// ----------
/// - `coefficients.dim() == (order, channels, channels)`.
/// - `residuals.nrows() == samples − order`.
/// - All stored values are finite whenever `fit` returned `Ok`.
///
/// Performance
/// -----------
/// - The solve is O(rows · (p·C)²) for the normal equations plus one LU
///   factorization of a (p·C) × (p·C) matrix; no further allocation after
///   construction.
#[derive(Debug, Clone)]
pub struct VARModel {
    order: usize,
    coefficients: Array3<f64>,
    residuals: Array2<f64>,
}

impl VARModel {
    /// Fit a VAR(p) model to a samples × channels series by least squares.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayView2<f64>`
    ///   Input series, samples × channels. Must satisfy the constraints
    ///   enforced by [`validate_series`].
    /// - `order`: `usize`
    ///   Model order p ≥ 1 (supplied by the caller; order selection is out
    ///   of scope for this crate).
    ///
    /// Returns
    /// -------
    /// `VARResult<VARModel>`
    ///   The fitted model with coefficient tensor (p × C × C) and residual
    ///   matrix ((T−p) × C), or a `VARError` describing the failure.
    ///
    /// Errors
    /// ------
    /// - Any validation error from [`validate_series`] (empty input,
    ///   invalid order, insufficient samples, non-finite values, constant
    ///   channels).
    /// - `VARError::SingularLagCovariance` when the normal-equation matrix
    ///   ZᵀZ admits no LU solve.
    ///
    /// Panics
    /// ------
    /// - Never panics for inputs that pass validation.
    ///
    /// Notes
    /// -----
    /// - Residuals are recomputed from the coefficient tensor applied to
    ///   the lagged data, so `residuals = X(t) − ∑ₙ A(n)·X(t−n)` holds by
    ///   construction and stays consistent with any later re-evaluation.
    /// - No intercept is estimated; callers should centre their series if
    ///   the mean is not negligible.
    pub fn fit(data: ArrayView2<f64>, order: usize) -> VARResult<VARModel> {
        validate_series(data, order)?;
        let (samples, channels) = data.dim();
        let rows = samples - order;
        let regressors = order * channels;

        // Lag-stacked design matrix Z and target matrix Y.
        let mut z = DMatrix::<f64>::zeros(rows, regressors);
        let mut y = DMatrix::<f64>::zeros(rows, channels);
        for t in 0..rows {
            for lag in 1..=order {
                for j in 0..channels {
                    z[(t, (lag - 1) * channels + j)] = data[[order + t - lag, j]];
                }
            }
            for i in 0..channels {
                y[(t, i)] = data[[order + t, i]];
            }
        }

        // Normal equations ZᵀZ·B = ZᵀY, solved by dense LU.
        let ztz = z.transpose() * &z;
        let zty = z.transpose() * &y;
        let beta = ztz.lu().solve(&zty).ok_or(VARError::SingularLagCovariance)?;

        let mut coefficients = Array3::<f64>::zeros((order, channels, channels));
        for lag in 0..order {
            for i in 0..channels {
                for j in 0..channels {
                    coefficients[[lag, i, j]] = beta[(lag * channels + j, i)];
                }
            }
        }

        let residuals = calc_residuals(data, &coefficients, order);

        Ok(VARModel { order, coefficients, residuals })
    }

    /// Model order p.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of channels C.
    pub fn channels(&self) -> usize {
        self.coefficients.dim().1
    }

    /// Coefficient tensor of shape (p, C, C).
    pub fn coefficients(&self) -> &Array3<f64> {
        &self.coefficients
    }

    /// Residual matrix of shape (T−p, C).
    pub fn residuals(&self) -> &Array2<f64> {
        &self.residuals
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Re-evaluate the fitted model on the lagged data and subtract the
/// prediction, yielding the residual matrix E of shape (T−p, C).
///
/// Assumes `data` and `coefficients` passed validation; indexing is in
/// bounds for `t ∈ [0, T−p)` and `lag ∈ [1, p]`.
fn calc_residuals(data: ArrayView2<f64>, coefficients: &Array3<f64>, order: usize) -> Array2<f64> {
    let (samples, channels) = data.dim();
    let rows = samples - order;
    let mut residuals = Array2::<f64>::zeros((rows, channels));
    for t in 0..rows {
        for i in 0..channels {
            let mut predicted = 0.0;
            for lag in 1..=order {
                for j in 0..channels {
                    predicted += coefficients[[lag - 1, i, j]] * data[[order + t - lag, j]];
                }
            }
            residuals[[t, i]] = data[[order + t, i]] - predicted;
        }
    }
    residuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coefficient recovery on a simulated 2-channel VAR(1) process with
    //   known coefficients.
    // - Shapes and finiteness of the coefficient tensor and residuals.
    // - Coefficient layout for order > 1.
    // - Surfacing of SingularLagCovariance for linearly dependent channels.
    //
    // They intentionally DO NOT cover:
    // - Input validation branches, which are tested in `var::validation`.
    // - Frequency-domain consumption of the fit, covered by the spectral
    //   and pipeline tests.
    // -------------------------------------------------------------------------

    /// Simulate a 2-channel VAR(1) process X(t) = A·X(t−1) + noise with
    /// zero-mean uniform innovations and a fixed seed.
    fn simulate_var1(a: [[f64; 2]; 2], samples: usize, seed: u64) -> Array2<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut data = Array2::<f64>::zeros((samples, 2));
        for t in 1..samples {
            for i in 0..2 {
                let driven: f64 = (0..2).map(|j| a[i][j] * data[[t - 1, j]]).sum();
                data[[t, i]] = driven + rng.gen::<f64>() - 0.5;
            }
        }
        data
    }

    #[test]
    // Purpose
    // -------
    // Verify that the least-squares fit recovers known VAR(1) coefficients
    // within tolerance when the sample count is large.
    //
    // Given
    // -----
    // - A simulated 2-channel VAR(1) process with
    //   A = [[0.5, 0.1], [0.0, 0.3]], 4000 samples, fixed seed.
    //
    // Expect
    // ------
    // - Every entry of the fitted A(1) is within 0.05 of the truth.
    fn fit_recovers_known_var1_coefficients() {
        // Arrange
        let a_true = [[0.5, 0.1], [0.0, 0.3]];
        let data = simulate_var1(a_true, 4000, 7);

        // Act
        let model = VARModel::fit(data.view(), 1).expect("fit should succeed on simulated data");

        // Assert
        for i in 0..2 {
            for j in 0..2 {
                let fitted = model.coefficients()[[0, i, j]];
                assert!(
                    (fitted - a_true[i][j]).abs() < 0.05,
                    "A[{i}][{j}]: fitted {fitted}, true {}",
                    a_true[i][j]
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check output shapes and finiteness for an order-2 fit.
    //
    // Given
    // -----
    // - A simulated 2-channel series of length 200 and order 2.
    //
    // Expect
    // ------
    // - Coefficient tensor has shape (2, 2, 2); residuals have shape
    //   (198, 2); all values finite.
    fn fit_order_two_has_expected_shapes() {
        // Arrange
        let data = simulate_var1([[0.4, 0.0], [0.2, 0.3]], 200, 11);

        // Act
        let model = VARModel::fit(data.view(), 2).expect("order-2 fit should succeed");

        // Assert
        assert_eq!(model.order(), 2);
        assert_eq!(model.channels(), 2);
        assert_eq!(model.coefficients().dim(), (2, 2, 2));
        assert_eq!(model.residuals().dim(), (198, 2));
        assert!(model.coefficients().iter().all(|v| v.is_finite()));
        assert!(model.residuals().iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Verify that residuals equal observation minus prediction for a
    // hand-checkable configuration.
    //
    // Given
    // -----
    // - A short 2-channel series and an order-1 fit.
    //
    // Expect
    // ------
    // - E(t) == X(t) − A(1)·X(t−1) for every row, recomputed directly
    //   from the fitted coefficients.
    fn fit_residuals_match_reevaluated_model() {
        // Arrange
        let data = simulate_var1([[0.5, 0.1], [0.0, 0.3]], 50, 3);

        // Act
        let model = VARModel::fit(data.view(), 1).expect("fit should succeed");

        // Assert
        let coeffs = model.coefficients();
        for t in 0..49 {
            for i in 0..2 {
                let predicted: f64 = (0..2).map(|j| coeffs[[0, i, j]] * data[[t, j]]).sum();
                let expected = data[[t + 1, i]] - predicted;
                let got = model.residuals()[[t, i]];
                assert!(
                    (got - expected).abs() < 1e-12,
                    "residual mismatch at ({t}, {i}): {got} vs {expected}"
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that exactly collinear channels surface
    // `SingularLagCovariance` instead of a garbage solution.
    //
    // Given
    // -----
    // - A 2-channel series whose second channel duplicates the first.
    //
    // Expect
    // ------
    // - `VARModel::fit` returns `Err(VARError::SingularLagCovariance)`.
    fn fit_rejects_collinear_channels() {
        // Arrange
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut data = Array2::<f64>::zeros((40, 2));
        for t in 0..40 {
            let v = rng.gen::<f64>() - 0.5;
            data[[t, 0]] = v;
            data[[t, 1]] = v;
        }

        // Act
        let result = VARModel::fit(data.view(), 1);

        // Assert
        assert_eq!(result.unwrap_err(), VARError::SingularLagCovariance);
    }

    #[test]
    // Purpose
    // -------
    // Pin the coefficient layout: channel j at lag n drives channel i via
    // coefficients[[n−1, i, j]].
    //
    // Given
    // -----
    // - A noiseless-but-jittered system where channel 0 strongly drives
    //   channel 1 with one lag and nothing else.
    //
    // Expect
    // ------
    // - The fitted [[0, 1, 0]] entry dominates the [[0, 0, 1]] entry.
    fn fit_coefficient_orientation_is_row_predicts_from_column() {
        // Arrange
        let data = simulate_var1([[0.0, 0.0], [0.8, 0.0]], 2000, 13);

        // Act
        let model = VARModel::fit(data.view(), 1).expect("fit should succeed");

        // Assert
        let driven = model.coefficients()[[0, 1, 0]];
        let reverse = model.coefficients()[[0, 0, 1]];
        assert!(driven > 0.5, "expected strong 0→1 coefficient, got {driven}");
        assert!(reverse.abs() < 0.2, "expected weak 1→0 coefficient, got {reverse}");
    }
}
