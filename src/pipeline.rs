//! pipeline — the reusable VAR → dDTF connectivity pipeline.
//!
//! Purpose
//! -------
//! Compose the estimation stages into one stateless, reusable pipeline:
//! fit the VAR model, build the frequency-domain transfer slices, derive
//! the cross-spectral density, compute partial coherence, and aggregate
//! the dDTF. A [`ConnectivityPipeline`] holds only the configuration
//! (model order and frequency grid); every call to
//! [`ConnectivityPipeline::run`] is independent, so the significance
//! tester can invoke the same configuration N+1 times — once for the
//! original series and once per surrogate — without re-deriving anything.
//!
//! Key behaviors
//! -------------
//! - Fixed stage order with fail-fast error propagation; a failure in any
//!   stage aborts the run with a [`PipelineError`] naming the stage's
//!   diagnosis.
//! - The returned [`ConnectivityOutcome`] is fully computed at
//!   construction and immutable afterwards.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pipeline itself is cheap to clone and free of mutable state;
//!   concurrent `run` calls on the same pipeline are safe and independent.
//! - Per-frequency work inside a run proceeds in ascending grid-index
//!   order, keeping results bit-reproducible for a given input.
//!
//! Downstream usage
//! ----------------
//! - ```rust
//!   use rust_connectivity::pipeline::ConnectivityPipeline;
//!   use rust_connectivity::spectral::FrequencyGrid;
//!
//!   # let mut data = ndarray::Array2::<f64>::zeros((128, 2));
//!   # for t in 0..128 {
//!   #     data[[t, 0]] = ((t as f64) * 0.7).sin();
//!   #     data[[t, 1]] = ((t as f64) * 1.3).cos();
//!   # }
//!   let grid = FrequencyGrid::new(0.01, 0.1, 10)?;
//!   let pipeline = ConnectivityPipeline::new(1, grid);
//!   let outcome = pipeline.run(data.view())?;
//!   assert_eq!(outcome.ddtf().magnitude().dim(), (2, 2));
//!   # Ok::<(), rust_connectivity::pipeline::PipelineError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover determinism of repeated runs, error propagation
//!   from the fitting stage, and outcome shapes; the integration test
//!   exercises the pipeline through the significance tester.

use crate::spectral::{
    DDTFOutcome, FrequencyGrid, PartialCoherence, SpectralDensity, SpectralError,
    TransferFunctions,
};
use crate::var::{VARError, VARModel};
use ndarray::ArrayView2;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type PipelineResult<T> = Result<T, PipelineError>;

/// PipelineError — aggregated failure conditions of one pipeline run.
///
/// Variants
/// --------
/// - `Var(VARError)`
///   The fitting stage failed (validation or singular lag covariance).
/// - `Spectral(SpectralError)`
///   A frequency-domain stage failed (singular slice, degenerate
///   variance, invalid grid).
///
/// Notes
/// -----
/// - `From` impls allow `?`-propagation from both subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Var(VARError),
    Spectral(SpectralError),
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Var(err) => write!(f, "VAR stage failed: {err}"),
            PipelineError::Spectral(err) => write!(f, "spectral stage failed: {err}"),
        }
    }
}

impl From<VARError> for PipelineError {
    fn from(err: VARError) -> PipelineError {
        PipelineError::Var(err)
    }
}

impl From<SpectralError> for PipelineError {
    fn from(err: SpectralError) -> PipelineError {
        PipelineError::Spectral(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<PipelineError> for PyErr {
    fn from(err: PipelineError) -> PyErr {
        PyValueError::new_err(format!("PipelineError: {err}"))
    }
}

/// ConnectivityPipeline — fixed configuration for repeated runs.
///
/// Purpose
/// -------
/// Hold the model order and frequency grid shared by every run of one
/// analysis. The pipeline is stateless beyond this configuration.
///
/// Fields
/// ------
/// - `order`: `usize`
///   VAR model order p (validated per run by the fitting stage).
/// - `grid`: [`FrequencyGrid`]
///   The analyzed frequency axis.
///
/// Performance
/// -----------
/// - Cloning copies the grid's F floats; runs share no state, so the
///   pipeline can be used from parallel workers by reference.
#[derive(Debug, Clone)]
pub struct ConnectivityPipeline {
    order: usize,
    grid: FrequencyGrid,
}

impl ConnectivityPipeline {
    /// Create a pipeline configuration from an order and a grid.
    pub fn new(order: usize, grid: FrequencyGrid) -> ConnectivityPipeline {
        ConnectivityPipeline { order, grid }
    }

    /// Model order p.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The analyzed frequency grid.
    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }

    /// Run the full VAR → dDTF pipeline on one series.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayView2<f64>`
    ///   Input series, samples × channels (original or surrogate).
    ///
    /// Returns
    /// -------
    /// `PipelineResult<ConnectivityOutcome>`
    ///   The immutable outcome, or the first stage failure.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::Var` for validation or fitting failures.
    /// - `PipelineError::Spectral` for singular slices or degenerate
    ///   residual variance, each carrying its frequency index.
    ///
    /// Notes
    /// -----
    /// - Two runs on identical input produce bitwise-identical outcomes;
    ///   there is no hidden randomness or iteration-order dependence.
    pub fn run(&self, data: ArrayView2<f64>) -> PipelineResult<ConnectivityOutcome> {
        let var = VARModel::fit(data, self.order)?;
        let transfer = TransferFunctions::from_coefficients(var.coefficients(), &self.grid)?;
        let density = SpectralDensity::build(var.residuals(), &transfer, &self.grid)?;
        let coherence = PartialCoherence::from_spectral_density(&density)?;
        let ddtf = DDTFOutcome::aggregate(&transfer, &coherence);
        Ok(ConnectivityOutcome { var, ddtf })
    }
}

/// ConnectivityOutcome — immutable result of one pipeline run.
///
/// Purpose
/// -------
/// Carry the fitted model and the aggregated dDTF outputs of a single
/// run. The heavyweight per-frequency tensors are dropped once the dDTF
/// is aggregated, keeping N surrogate outcomes cheap to hold.
///
/// Fields
/// ------
/// - `var`: [`VARModel`]
///   The fitted model (coefficients and residuals).
/// - `ddtf`: [`DDTFOutcome`]
///   Aggregated dDTF, magnitudes, and degree vectors.
#[derive(Debug, Clone)]
pub struct ConnectivityOutcome {
    var: VARModel,
    ddtf: DDTFOutcome,
}

impl ConnectivityOutcome {
    /// The fitted VAR model.
    pub fn var(&self) -> &VARModel {
        &self.var
    }

    /// The aggregated dDTF outputs.
    pub fn ddtf(&self) -> &DDTFOutcome {
        &self.ddtf
    }
}
