//! surrogate::generator — phase-randomized surrogate data.
//!
//! Purpose
//! -------
//! Produce the N × T × C surrogate tensor that drives the null
//! distribution of the significance test. Each (set, channel) slice is a
//! phase-randomized reconstruction of the original channel: the channel's
//! DFT magnitudes are kept, the DC bin is preserved exactly, and every
//! other bin is rotated by a fresh uniform phase in [0, 2π). Phases are
//! drawn separately for the first half (bins 1..=⌊(T−1)/2⌋) and the
//! second half (the remaining bins) of the spectrum — two independent
//! draws, not a mirrored Hermitian-symmetric pair — so the inverse
//! transform is not guaranteed to be strictly real and only its real part
//! is kept. This reproduces the surrogate procedure of Liu et al. (2012)
//! as a documented approximation; a consequence is that non-DC bin
//! magnitudes of the surrogate are bounded above by (rather than equal
//! to) the original's.
//!
//! Key behaviors
//! -------------
//! - One forward DFT per original channel, shared read-only across all
//!   sets; one inverse DFT per (set, channel) with explicit 1/T
//!   normalization (rustfft does not normalize).
//! - Deterministic seeding: each set derives its own ChaCha8 stream from
//!   the master seed and the set index, so the output tensor is
//!   bit-reproducible regardless of how rayon schedules the sets.
//! - Sets are generated in parallel, each writing a disjoint slot of the
//!   preallocated output tensor.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is finite and non-empty; validation rejects anything else
//!   before any DFT work.
//! - Per channel, the surrogate's DC Fourier coefficient equals the
//!   original's exactly; every other bin magnitude is ≤ the original's.
//! - Cross-channel and autocorrelative phase structure of the original is
//!   destroyed by construction.
//!
//! Conventions
//! -----------
//! - Within one set, channels are processed in ascending index order and
//!   phases are drawn first-half-then-second-half in ascending bin order;
//!   changing the draw order changes the reproducibility contract.
//!
//! Testing notes
//! -------------
//! - Unit tests cover seed reproducibility, DC preservation, the per-bin
//!   magnitude bound, output shape, and validation errors.

use crate::surrogate::errors::{SurrogateError, SurrogateResult};
use ndarray::{Array2, Array3, ArrayView2, s};
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// SurrogateOptions — set count and master seed for generation.
///
/// Purpose
/// -------
/// Compact configuration for [`generate_surrogates`]. The default set
/// count (2500) follows Liu et al. (2012).
///
/// Fields
/// ------
/// - `num_sets`: `usize`
///   Number of surrogate sets N ≥ 1.
/// - `seed`: `u64`
///   Master seed; each set mixes it with its index into an independent
///   ChaCha8 stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurrogateOptions {
    /// Number of surrogate sets to generate.
    pub num_sets: usize,
    /// Master seed for the per-set random streams.
    pub seed: u64,
}

impl SurrogateOptions {
    /// Construct options from an explicit set count and seed.
    pub fn new(num_sets: usize, seed: u64) -> SurrogateOptions {
        SurrogateOptions { num_sets, seed }
    }
}

impl Default for SurrogateOptions {
    /// Defaults of Liu et al. (2012): 2500 sets, seed 0.
    fn default() -> SurrogateOptions {
        SurrogateOptions { num_sets: 2500, seed: 0 }
    }
}

/// Generate the N × T × C phase-randomized surrogate tensor.
///
/// Parameters
/// ----------
/// - `data`: `ArrayView2<f64>`
///   Original series, samples × channels; must be finite and non-empty.
/// - `options`: `&SurrogateOptions`
///   Set count and master seed.
///
/// Returns
/// -------
/// `SurrogateResult<Array3<f64>>`
///   The surrogate tensor, shape (N, T, C).
///
/// Errors
/// ------
/// - `SurrogateError::EmptySeries` for a zero-sample or zero-channel
///   input.
/// - `SurrogateError::NonFiniteValue(value)` for NaN or ±∞ entries.
/// - `SurrogateError::ZeroSets` when `options.num_sets == 0`.
///
/// Panics
/// ------
/// - Never panics for validated input.
///
/// Notes
/// -----
/// - The same `(data, options)` always yields a bitwise-identical tensor;
///   set-level parallelism does not affect the draws because each set
///   owns an independent stream derived from `seed` and its index.
pub fn generate_surrogates(
    data: ArrayView2<f64>, options: &SurrogateOptions,
) -> SurrogateResult<Array3<f64>> {
    let (samples, channels) = data.dim();
    if samples == 0 || channels == 0 {
        return Err(SurrogateError::EmptySeries);
    }
    if options.num_sets == 0 {
        return Err(SurrogateError::ZeroSets);
    }
    for &value in data.iter() {
        if !value.is_finite() {
            return Err(SurrogateError::NonFiniteValue(value));
        }
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(samples);
    let ifft = planner.plan_fft_inverse(samples);

    // One forward transform per channel, shared read-only by every set.
    let mut spectra: Vec<Vec<Complex64>> = Vec::with_capacity(channels);
    for c in 0..channels {
        let mut buffer: Vec<Complex64> =
            (0..samples).map(|t| Complex64::new(data[[t, c]], 0.0)).collect();
        fft.process(&mut buffer);
        spectra.push(buffer);
    }

    let sets: Vec<Array2<f64>> = (0..options.num_sets)
        .into_par_iter()
        .map(|set| {
            build_set(&spectra, &ifft, samples, channels, mix_seed(options.seed, set))
        })
        .collect();

    let mut tensor = Array3::<f64>::zeros((options.num_sets, samples, channels));
    for (set, slice) in sets.into_iter().enumerate() {
        tensor.slice_mut(s![set, .., ..]).assign(&slice);
    }
    Ok(tensor)
}

/// Destroyed-phase check helper: lag-1 autocorrelation of one channel of
/// a set slice. Exposed for tests; not part of the public surface.
#[cfg(test)]
pub(crate) fn lag1_autocorrelation(series: ndarray::ArrayView1<f64>) -> f64 {
    let n = series.len();
    let mean = series.sum() / n as f64;
    let denom: f64 = series.iter().map(|&x| (x - mean).powi(2)).sum();
    let numer: f64 =
        (1..n).map(|t| (series[t] - mean) * (series[t - 1] - mean)).sum();
    numer / denom
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Mix the master seed with a set index into an independent stream seed.
/// Bit-rotation plus a golden-ratio multiply keeps nearby indices far
/// apart in seed space.
fn mix_seed(seed: u64, set: usize) -> u64 {
    (seed ^ (set as u64).rotate_left(32)).wrapping_mul(0x9e3779b97f4a7c15)
}

/// Build one T × C surrogate set: per channel, rotate the non-DC bins by
/// fresh phases (first half, then second half), inverse-transform with
/// 1/T normalization, and keep the real part.
fn build_set(
    spectra: &[Vec<Complex64>], ifft: &Arc<dyn Fft<f64>>, samples: usize, channels: usize,
    seed: u64,
) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let half_len = (samples - 1) / 2;
    let scale = 1.0 / samples as f64;

    let mut set = Array2::<f64>::zeros((samples, channels));
    for c in 0..channels {
        let mut buffer = spectra[c].clone();

        // First spectral half: bins 1..=half_len.
        for bin in buffer.iter_mut().take(half_len + 1).skip(1) {
            let phase = 2.0 * PI * rng.gen::<f64>();
            *bin *= Complex64::from_polar(1.0, phase);
        }
        // Second spectral half: bins half_len+1..T, drawn independently.
        for bin in buffer.iter_mut().skip(half_len + 1) {
            let phase = 2.0 * PI * rng.gen::<f64>();
            *bin *= Complex64::from_polar(1.0, phase);
        }

        ifft.process(&mut buffer);
        for t in 0..samples {
            set[[t, c]] = buffer[t].re * scale;
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bit-reproducibility under a fixed seed and divergence under a
    //   different seed.
    // - Exact DC-bin preservation and the per-bin magnitude upper bound.
    // - Output tensor shape and validation errors.
    // - Destruction of autocorrelative structure on a strongly
    //   autocorrelated input.
    //
    // They intentionally DO NOT cover:
    // - Consumption of the tensor by the significance tester, which is
    //   exercised in the integration tests.
    // -------------------------------------------------------------------------

    fn sample_data(samples: usize, channels: usize, seed: u64) -> Array2<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Array2::from_shape_fn((samples, channels), |_| rng.gen::<f64>() - 0.5)
    }

    fn channel_spectrum(series: ndarray::ArrayView1<f64>) -> Vec<Complex64> {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(series.len());
        let mut buffer: Vec<Complex64> =
            series.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        fft.process(&mut buffer);
        buffer
    }

    #[test]
    // Purpose
    // -------
    // Verify bit-reproducibility: the same seed yields identical tensors,
    // a different seed yields a different one.
    //
    // Given
    // -----
    // - A 64×2 series, 5 sets, seeds 42 and 43.
    //
    // Expect
    // ------
    // - Two runs with seed 42 are equal; seed 43 differs somewhere.
    fn generate_surrogates_is_bit_reproducible_per_seed() {
        // Arrange
        let data = sample_data(64, 2, 1);
        let opts_a = SurrogateOptions::new(5, 42);
        let opts_b = SurrogateOptions::new(5, 43);

        // Act
        let first = generate_surrogates(data.view(), &opts_a).unwrap();
        let second = generate_surrogates(data.view(), &opts_a).unwrap();
        let other = generate_surrogates(data.view(), &opts_b).unwrap();

        // Assert
        assert_eq!(first, second, "same seed should reproduce bitwise");
        assert_ne!(first, other, "different seeds should diverge");
    }

    #[test]
    // Purpose
    // -------
    // Verify the spectral guarantees: the DC coefficient of every
    // surrogate channel equals the original's exactly (to fp tolerance),
    // and every other bin magnitude is bounded above by the original's.
    //
    // Given
    // -----
    // - A 100×2 series and 3 surrogate sets.
    //
    // Expect
    // ------
    // - |DC difference| < 1e-9 per channel and set; for every bin k,
    //   |FFT(surrogate)[k]| ≤ |FFT(original)[k]| + 1e-9.
    fn generate_surrogates_preserves_dc_and_bounds_bin_magnitudes() {
        // Arrange
        let data = sample_data(100, 2, 2);
        let opts = SurrogateOptions::new(3, 7);

        // Act
        let tensor = generate_surrogates(data.view(), &opts).unwrap();

        // Assert
        for set in 0..3 {
            for c in 0..2 {
                let original = channel_spectrum(data.column(c));
                let surrogate_series = tensor.slice(s![set, .., c]);
                let surrogate = channel_spectrum(surrogate_series);

                assert!(
                    (surrogate[0] - original[0]).norm() < 1e-9,
                    "set {set} channel {c}: DC bin not preserved"
                );
                for k in 1..100 {
                    assert!(
                        surrogate[k].norm() <= original[k].norm() + 1e-9,
                        "set {set} channel {c} bin {k}: magnitude bound violated"
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the output shape is (N, T, C).
    //
    // Given
    // -----
    // - A 50×3 series and 4 sets.
    //
    // Expect
    // ------
    // - The tensor has shape (4, 50, 3) with finite entries.
    fn generate_surrogates_has_expected_shape() {
        // Arrange
        let data = sample_data(50, 3, 3);
        let opts = SurrogateOptions::new(4, 11);

        // Act
        let tensor = generate_surrogates(data.view(), &opts).unwrap();

        // Assert
        assert_eq!(tensor.dim(), (4, 50, 3));
        assert!(tensor.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Verify validation: empty input, zero sets, and non-finite values
    // are rejected.
    //
    // Given
    // -----
    // - A 0×0 matrix; a valid matrix with 0 sets; a matrix with NaN.
    //
    // Expect
    // ------
    // - EmptySeries, ZeroSets, and NonFiniteValue respectively.
    fn generate_surrogates_rejects_invalid_inputs() {
        // Arrange
        let empty = Array2::<f64>::zeros((0, 0));
        let valid = sample_data(16, 1, 4);
        let mut with_nan = sample_data(16, 1, 5);
        with_nan[[3, 0]] = f64::NAN;

        // Act & Assert
        assert_eq!(
            generate_surrogates(empty.view(), &SurrogateOptions::new(2, 0)).unwrap_err(),
            SurrogateError::EmptySeries
        );
        assert_eq!(
            generate_surrogates(valid.view(), &SurrogateOptions::new(0, 0)).unwrap_err(),
            SurrogateError::ZeroSets
        );
        assert!(matches!(
            generate_surrogates(with_nan.view(), &SurrogateOptions::new(2, 0)),
            Err(SurrogateError::NonFiniteValue(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify that phase randomization destroys autocorrelative structure:
    // a strongly autocorrelated channel yields surrogates whose lag-1
    // autocorrelation is materially reduced on average.
    //
    // Given
    // -----
    // - An AR(1) channel with coefficient 0.95 (lag-1 autocorrelation
    //   near 0.95) and 20 surrogate sets.
    //
    // Expect
    // ------
    // - The mean surrogate lag-1 autocorrelation is below 0.6.
    fn generate_surrogates_destroys_autocorrelation() {
        // Arrange
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let samples = 256;
        let mut data = Array2::<f64>::zeros((samples, 1));
        for t in 1..samples {
            data[[t, 0]] = 0.95 * data[[t - 1, 0]] + rng.gen::<f64>() - 0.5;
        }
        let original_rho = lag1_autocorrelation(data.column(0));
        assert!(original_rho > 0.8, "test setup: original should be autocorrelated");

        // Act
        let tensor = generate_surrogates(data.view(), &SurrogateOptions::new(20, 31)).unwrap();

        // Assert
        let mean_rho: f64 = (0..20)
            .map(|set| lag1_autocorrelation(tensor.slice(s![set, .., 0])))
            .sum::<f64>()
            / 20.0;
        assert!(
            mean_rho < 0.6,
            "surrogates should lose most autocorrelation, got mean rho {mean_rho}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Exercise the odd/even sample-count edge around the spectral halves:
    // both parities must produce finite surrogates with preserved DC.
    //
    // Given
    // -----
    // - Series of lengths 9 (odd) and 8 (even), one channel each.
    //
    // Expect
    // ------
    // - Finite output; DC bin preserved for both parities.
    fn generate_surrogates_handles_odd_and_even_lengths() {
        // Arrange & Act & Assert
        for samples in [9_usize, 8_usize] {
            let data = sample_data(samples, 1, samples as u64);
            let tensor =
                generate_surrogates(data.view(), &SurrogateOptions::new(2, 1)).unwrap();
            assert!(tensor.iter().all(|v| v.is_finite()));

            let original = channel_spectrum(data.column(0));
            let surrogate = channel_spectrum(tensor.slice(s![0, .., 0]));
            assert!(
                (surrogate[0] - original[0]).norm() < 1e-9,
                "length {samples}: DC bin not preserved"
            );
        }
    }
}
