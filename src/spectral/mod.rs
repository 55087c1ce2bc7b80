//! spectral — frequency-domain connectivity stages.
//!
//! Purpose
//! -------
//! Collect the frequency-domain half of the connectivity pipeline: the
//! analyzed frequency grid, the AR-to-frequency transfer slices
//! A(f)/H(f)/H^H(f), the residual-derived cross-spectral density S(f),
//! the cofactor-based partial coherence θ(f), and the dDTF aggregation
//! with its degree measures. The complex-matrix helpers shared by these
//! stages (ndarray ↔ nalgebra bridge, LU inversion, Hermitian checks)
//! live in [`linalg`].
//!
//! Key behaviors
//! -------------
//! - One consistent frequency-major axis ordering (f, i, j) across every
//!   tensor in the subtree.
//! - Per-frequency matrix work proceeds in ascending grid-index order so
//!   the final dDTF reduction is bit-reproducible.
//! - Numerical failures carry the offending frequency index via
//!   [`SpectralError`]; Inf/NaN never propagate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs originate from a validated VAR fit; every stage may assume
//!   finite inputs and report only its own degeneracies.
//! - All stage outputs are immutable once constructed and are shared
//!   read-only within a single pipeline run.
//!
//! Downstream usage
//! ----------------
//! - The pipeline layer composes these stages in fixed order:
//!
//!   ```text
//!   TransferFunctions → SpectralDensity → PartialCoherence → DDTFOutcome
//!   ```
//!
//!   Callers normally do not invoke the stages individually.
//!
//! Testing notes
//! -------------
//! - Hand-computed regression tests pin the AR-to-frequency transform and
//!   the cofactor ratios; Hermitian-symmetry checks cover the complex-
//!   matrix plumbing; the degree identity is asserted at the dDTF stage.

pub mod coherence;
pub mod ddtf;
pub mod density;
pub mod errors;
pub mod grid;
pub mod linalg;
pub mod transfer;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::coherence::PartialCoherence;
pub use self::ddtf::DDTFOutcome;
pub use self::density::SpectralDensity;
pub use self::errors::{SpectralError, SpectralResult};
pub use self::grid::FrequencyGrid;
pub use self::transfer::TransferFunctions;
