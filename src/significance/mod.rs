//! significance — surrogate-driven significance testing.
//!
//! Purpose
//! -------
//! Decide which directed connections of the observed dDTF matrix are
//! statistically significant. The subtree drives N independent pipeline
//! runs over the surrogate tensor, builds a per-connection null
//! distribution, applies a one-sample t-test with a halved (one-tailed)
//! p-value, and prunes the non-significant connections.
//!
//! Key behaviors
//! -------------
//! - Parallel surrogate pipeline execution with abort-on-first-failure
//!   semantics and deterministic collection order.
//! - Structured statistical-degeneracy errors naming the connection.
//!
//! Downstream usage
//! ----------------
//! - The analysis layer composes this subtree with the surrogate
//!   generator; native callers can also invoke
//!   [`SignificanceOutcome::from_surrogates`] directly with their own
//!   surrogate tensor.
//!
//! Testing notes
//! -------------
//! - Unit tests live in [`errors`] and [`testing`]; the end-to-end
//!   driven-system behavior is covered by the integration tests.

pub mod errors;
pub mod testing;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SigError, SigResult};
pub use self::testing::SignificanceOutcome;
