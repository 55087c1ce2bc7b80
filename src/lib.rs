//! rust_connectivity — directed effective-connectivity estimation.
//!
//! Purpose
//! -------
//! Estimate directed effective connectivity between channels of a
//! multichannel time series and establish which directed connections are
//! statistically significant. The crate fits a vector-autoregressive
//! (VAR) model, derives the direct Directed Transfer Function (dDTF) over
//! a frequency grid, and tests every connection against a null
//! distribution built from phase-randomized surrogate data, following
//! the analysis pipeline of Liu et al. (2012). When the
//! `python-bindings` feature is enabled, this module additionally defines
//! the PyO3 classes and the `_rust_connectivity` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core subsystems (`var`, `spectral`, `pipeline`,
//!   `surrogate`, `significance`, `analysis`) as the public crate
//!   surface.
//! - Compose them behind one entry point,
//!   [`ConnectivityAnalysis`](analysis::ConnectivityAnalysis), producing
//!   the pruned network, raw |dDTF|, p-values, and degree vectors.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for
//!   the `_rust_connectivity` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work lives in the inner modules; this file
//!   performs only re-exports, FFI glue, input conversion, and error
//!   mapping.
//! - Upstream preprocessing (detrending, ICA decomposition) and VAR
//!   order selection happen outside the crate; inputs are validated but
//!   never transformed.
//! - Every analysis is deterministic for a fixed configuration, seed,
//!   and input.
//!
//! Conventions
//! -----------
//! - Matrices are samples × channels on input and target × source
//!   (row × column) on output.
//! - Errors from core Rust code are rich per-subtree enums, converted to
//!   `PyValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code depends on the inner modules directly and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature:
//!
//!   ```rust
//!   use rust_connectivity::analysis::ConnectivityAnalysis;
//!
//!   # let mut data = ndarray::Array2::<f64>::zeros((96, 2));
//!   # for t in 0..96 {
//!   #     data[[t, 0]] = ((t as f64) * 0.9).sin();
//!   #     data[[t, 1]] = ((t as f64) * 1.7).cos();
//!   # }
//!   let config = ConnectivityAnalysis { num_surrogates: 16, ..Default::default() };
//!   let report = config.analyze(data.view())?;
//!   assert_eq!(report.pruned.dim(), (2, 2));
//!   # Ok::<(), rust_connectivity::analysis::ConnectivityError>(())
//!   ```
//!
//! - The Python packaging layer imports the `_rust_connectivity` module
//!   defined here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules and by `tests/integration_connectivity_pipeline.rs`, which
//!   exercises simulated driven systems end to end.

pub mod analysis;
pub mod pipeline;
pub mod significance;
pub mod spectral;
pub mod surrogate;
pub mod utils;
pub mod var;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::{ConnectivityAnalysis, ConnectivityReport},
    utils::{extract_f64_matrix, matrix_to_vecs},
};

/// EffectiveConnectivity — Python-facing wrapper for a full analysis.
///
/// Purpose
/// -------
/// Run the complete VAR → dDTF → surrogate-significance analysis when
/// constructed from Python and expose the produced matrices and degree
/// vectors as read-only properties.
///
/// Key behaviors
/// -------------
/// - Validate and convert the Python input into a samples × channels
///   `f64` matrix.
/// - Run [`ConnectivityAnalysis::analyze`] with the supplied parameters
///   and store the resulting [`ConnectivityReport`].
/// - Expose matrix properties as row-major `Vec<Vec<f64>>` values and
///   degree vectors as `Vec<f64>`.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `EffectiveConnectivity(data, order=1, num_frequencies=10,
/// lower_frequency_limit=0.01, upper_frequency_limit=0.1,
/// num_surrogates=2500, alpha=0.05, seed=0)`.
///
/// Fields
/// ------
/// - `inner`: [`ConnectivityReport`]
///   Rust-side result bundle backing all property accessors.
///
/// Notes
/// -----
/// - This type exists solely for the PyO3 surface; native Rust callers
///   should use [`ConnectivityAnalysis`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_connectivity.connectivity")]
pub struct EffectiveConnectivity {
    /// The analysis result bundle.
    inner: ConnectivityReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl EffectiveConnectivity {
    /// Result of a full effective-connectivity analysis.
    ///
    /// Non-significant connections (one-tailed p ≥ alpha) are zeroed in
    /// `pruned_network`; the raw magnitudes stay available separately.
    #[new]
    #[pyo3(
        signature = (
            data,
            order = 1,
            num_frequencies = 10,
            lower_frequency_limit = 0.01,
            upper_frequency_limit = 0.1,
            num_surrogates = 2500,
            alpha = 0.05,
            seed = 0,
        ),
        text_signature = "(data, /, order=1, num_frequencies=10, lower_frequency_limit=0.01, \
                          upper_frequency_limit=0.1, num_surrogates=2500, alpha=0.05, seed=0)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, order: usize, num_frequencies: usize,
        lower_frequency_limit: f64, upper_frequency_limit: f64, num_surrogates: usize,
        alpha: f64, seed: u64,
    ) -> PyResult<EffectiveConnectivity> {
        let matrix = extract_f64_matrix(py, data)?;
        let config = ConnectivityAnalysis::new(
            order,
            (lower_frequency_limit, upper_frequency_limit),
            num_frequencies,
            num_surrogates,
            alpha,
            seed,
        );
        let report = config.analyze(matrix.view())?;
        Ok(EffectiveConnectivity { inner: report })
    }

    /// Pruned effective-connectivity network (non-significant entries 0).
    #[getter]
    pub fn pruned_network(&self) -> Vec<Vec<f64>> {
        matrix_to_vecs(&self.inner.pruned)
    }

    /// Raw (unpruned) |dDTF| matrix.
    #[getter]
    pub fn ddtf_magnitude(&self) -> Vec<Vec<f64>> {
        matrix_to_vecs(&self.inner.magnitude)
    }

    /// One-tailed p-value per connection.
    #[getter]
    pub fn p_values(&self) -> Vec<Vec<f64>> {
        matrix_to_vecs(&self.inner.p_values)
    }

    /// Significance mask (p < alpha) per connection.
    #[getter]
    pub fn significance_mask(&self) -> Vec<Vec<bool>> {
        let (rows, _) = self.inner.mask.dim();
        (0..rows).map(|i| self.inner.mask.row(i).to_vec()).collect()
    }

    /// In-degree (row sums of |dDTF|).
    #[getter]
    pub fn in_degree(&self) -> Vec<f64> {
        self.inner.in_degree.to_vec()
    }

    /// Out-degree (column sums of |dDTF|).
    #[getter]
    pub fn out_degree(&self) -> Vec<f64> {
        self.inner.out_degree.to_vec()
    }

    /// Elementwise in-degree + out-degree.
    #[getter]
    pub fn in_and_out_degree(&self) -> Vec<f64> {
        self.inner.in_and_out.to_vec()
    }
}

/// _rust_connectivity — PyO3 module initializer for the extension.
///
/// Creates the `connectivity` submodule, attaches it to the parent
/// module, and registers it in `sys.modules` so dotted imports work from
/// Python. Invoked automatically on import; never called by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_connectivity<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let connectivity_mod = PyModule::new(_py, "connectivity")?;
    connectivity(_py, m, &connectivity_mod)?;

    // Manually add the submodule into sys.modules to allow dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_connectivity.connectivity", connectivity_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn connectivity<'py>(
    _py: Python, rust_connectivity: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<EffectiveConnectivity>()?;
    rust_connectivity.add_submodule(m)?;
    Ok(())
}
