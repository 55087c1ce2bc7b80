#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray2;

/// Extract a samples × channels `f64` matrix from a Python object.
///
/// Accepts a 2-D `numpy.ndarray`, anything exposing `to_numpy()` (e.g. a
/// `pandas.DataFrame`), or a sequence of equal-length float64 rows.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    _py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let row_count = rows.len();
    let col_count = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != col_count) {
        return Err(PyTypeError::new_err("all rows must have the same length"));
    }
    let mut matrix = Array2::<f64>::zeros((row_count, col_count));
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }
    Ok(matrix)
}

/// Convert an `Array2<f64>` into row-major `Vec<Vec<f64>>` for Python.
#[cfg(feature = "python-bindings")]
pub fn matrix_to_vecs(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    let (rows, _) = matrix.dim();
    (0..rows).map(|i| matrix.row(i).to_vec()).collect()
}
