//! spectral::linalg — complex-matrix helpers for per-frequency slices.
//!
//! Purpose
//! -------
//! Provide the small complex-matrix toolbox shared by the frequency-domain
//! stages: the `ndarray` → `nalgebra` bridge, dense LU inversion and
//! determinants, conjugate transposition, and an explicit Hermitian-
//! symmetry check. Keeping these in one place means the rest of the
//! subtree works purely in `ndarray` tensors and crosses the `nalgebra`
//! boundary through audited helpers only.
//!
//! Key behaviors
//! -------------
//! - Copy a C×C complex slice into a `DMatrix<Complex64>` column by
//!   column, matching `DMatrix`'s column-major storage.
//! - Invert slices with nalgebra's dense LU (`try_inverse`), reporting
//!   singularity as `None` instead of Inf/NaN entries.
//! - Compute determinants for the cofactor construction, where the
//!   cofactor matrix itself is the required output.
//!
//! Conventions
//! -----------
//! - All helpers take `ArrayView2<Complex64>` and return owned `ndarray`
//!   values; `DMatrix` never appears in a signature outside this module.
//! - The Hermitian check compares `m[i][j]` against `conj(m[j][i])`
//!   entrywise with an absolute tolerance.
//!
//! Testing notes
//! -------------
//! - Unit tests pin conjugate transposition, a hand-computed 2×2 complex
//!   inverse, `None` on singular input, and the Hermitian predicate on
//!   both symmetric and asymmetric inputs.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

/// Copy a square complex slice into a preallocated `DMatrix`.
///
/// The copy proceeds column by column to match the column-major storage
/// of `DMatrix`. Both arguments must be C×C with the same C; mismatches
/// are programmer errors and panic via out-of-bounds indexing.
fn fill_complex_dmatrix(source: ArrayView2<Complex64>, target: &mut DMatrix<Complex64>) {
    let n = source.ncols();
    for j in 0..n {
        for i in 0..n {
            target[(i, j)] = source[[i, j]];
        }
    }
}

/// Invert a square complex slice with a dense LU factorization.
///
/// Parameters
/// ----------
/// - `slice`: `ArrayView2<Complex64>`
///   Square C×C matrix.
///
/// Returns
/// -------
/// `Option<Array2<Complex64>>`
///   The inverse, or `None` when the matrix is numerically singular.
///
/// Notes
/// -----
/// - Callers translate `None` into the appropriate `SpectralError` with
///   the offending frequency index; this helper has no index context.
pub fn invert_slice(slice: ArrayView2<Complex64>) -> Option<Array2<Complex64>> {
    let n = slice.ncols();
    let mut m = DMatrix::<Complex64>::zeros(n, n);
    fill_complex_dmatrix(slice, &mut m);
    let inverse = m.try_inverse()?;
    let mut out = Array2::<Complex64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            out[[i, j]] = inverse[(i, j)];
        }
    }
    Some(out)
}

/// Determinant of a square complex slice (dense LU).
pub fn determinant(slice: ArrayView2<Complex64>) -> Complex64 {
    let n = slice.ncols();
    let mut m = DMatrix::<Complex64>::zeros(n, n);
    fill_complex_dmatrix(slice, &mut m);
    m.determinant()
}

/// Conjugate transpose of a square complex slice.
pub fn conjugate_transpose(slice: ArrayView2<Complex64>) -> Array2<Complex64> {
    let (rows, cols) = slice.dim();
    let mut out = Array2::<Complex64>::zeros((cols, rows));
    for i in 0..rows {
        for j in 0..cols {
            out[[j, i]] = slice[[i, j]].conj();
        }
    }
    out
}

/// Entrywise Hermitian-symmetry check: `m[i][j] ≈ conj(m[j][i])` within
/// an absolute tolerance.
pub fn is_hermitian(slice: ArrayView2<Complex64>, tolerance: f64) -> bool {
    let n = slice.ncols();
    if slice.nrows() != n {
        return false;
    }
    for i in 0..n {
        for j in 0..n {
            if (slice[[i, j]] - slice[[j, i]].conj()).norm() > tolerance {
                return false;
            }
        }
    }
    true
}
