//! surrogate — phase-randomized surrogate data generation.
//!
//! Purpose
//! -------
//! Build the null-hypothesis data for the significance test: N synthetic
//! copies of the original series that keep each channel's power spectrum
//! (DC bin exactly, other bins up to the real-part projection) while
//! destroying phase relationships within and across channels. Generation
//! runs once per analysis; the tensor is then consumed read-only by N
//! independent pipeline runs.
//!
//! Key behaviors
//! -------------
//! - Seeded, bit-reproducible generation via per-set ChaCha8 streams.
//! - Parallel set generation with disjoint output slots.
//! - Structured validation errors; no NaN propagation.
//!
//! Downstream usage
//! ----------------
//! - ```rust
//!   use rust_connectivity::surrogate::{SurrogateOptions, generate_surrogates};
//!
//!   # let data = ndarray::Array2::<f64>::from_shape_fn((32, 2), |(t, c)| {
//!   #     ((t + c) as f64).sin()
//!   # });
//!   let tensor = generate_surrogates(data.view(), &SurrogateOptions::new(8, 42))?;
//!   assert_eq!(tensor.dim(), (8, 32, 2));
//!   # Ok::<(), rust_connectivity::surrogate::SurrogateError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests in [`generator`] cover reproducibility, spectral
//!   guarantees, and validation; the integration tests exercise the
//!   tensor through the significance tester.

pub mod errors;
pub mod generator;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SurrogateError, SurrogateResult};
pub use self::generator::{SurrogateOptions, generate_surrogates};
