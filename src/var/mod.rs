//! var — vector-autoregressive model fitting.
//!
//! Purpose
//! -------
//! Provide the VAR estimation stage of the connectivity pipeline: input
//! validation, least-squares coefficient estimation, and residual
//! extraction. Model order selection, preprocessing, and any I/O are
//! explicitly out of scope; the order is supplied by the caller.
//!
//! Key behaviors
//! -------------
//! - Fit X(t) = ∑ₙ A(n)·X(t−n) + E(t) by ordinary least squares via
//!   [`VARModel::fit`].
//! - Centralize shape/finiteness/degeneracy guards in
//!   [`validate_series`] so downstream stages never see NaN.
//! - Report all failures through [`VARError`] / [`VARResult`].
//!
//! Downstream usage
//! ----------------
//! - Typical callers go through the pipeline layer:
//!
//!   ```rust
//!   use rust_connectivity::var::VARModel;
//!
//!   # let data = ndarray::Array2::<f64>::from_shape_fn((64, 2), |(t, c)| {
//!   #     ((t * (c + 2)) as f64).sin()
//!   # });
//!   let model = VARModel::fit(data.view(), 1)?;
//!   assert_eq!(model.coefficients().dim().0, 1);
//!   # Ok::<(), rust_connectivity::var::VARError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside the code in [`errors`], [`validation`], and
//!   [`fit`]; the pipeline integration test exercises the fit end to end.

pub mod errors;
pub mod fit;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{VARError, VARResult};
pub use self::fit::VARModel;
pub use self::validation::validate_series;
