//! utils — NumPy extraction helpers for the PyO3 binding surface.
//!
//! Everything here is gated behind the `python-bindings` feature and is
//! considered internal plumbing: the helpers normalize arbitrary Python
//! array-likes (numpy arrays, pandas objects exposing `to_numpy`, plain
//! sequences) into contiguous read-only arrays before the core Rust
//! entry points run.

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec / Array → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Coerce a Python object into a read-only 1-D float64 array.
///
/// Accepts, in order of preference: a numpy `float64` array, any object
/// exposing `to_numpy(copy)` (pandas Series), or a plain sequence of
/// floats. Raises `TypeError` when none of the conversions apply.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Coerce a Python object into a read-only 2-D float64 array.
///
/// Accepts a numpy `float64` matrix, any object exposing `to_numpy(copy)`
/// (pandas DataFrame), or a rectangular sequence of float sequences.
/// Raises `TypeError` on anything else, including ragged nested
/// sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;

    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(pyo3::exceptions::PyTypeError::new_err(
            "design matrix rows must all have the same length",
        ));
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    let matrix = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err("design matrix has an inconsistent shape")
    })?;
    Ok(matrix.into_pyarray(py).readonly())
}
