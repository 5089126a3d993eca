//! rust_breakpoints — structural-break detection with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the CUSUM structural-break tests to Python via the
//! `_rust_breakpoints` extension module. When the `python-bindings` feature
//! is enabled, this module defines the Python-facing classes and submodule
//! used by the `rust_breakpoints` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`structural_break`) as the public
//!   crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_breakpoints` Python extension.
//! - Create and register the `structural_break` Python submodule under
//!   `rust_breakpoints` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input coercion, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts
//!   (`CusumOlsOutcome`, `CusumRecOutcome`).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_breakpoints.structural_break`
//!   and are typically wrapped by thin pure-Python facades in the top-level
//!   `rust_breakpoints` package.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//! - Python callers pass sample labels as an optional integer sequence
//!   (ordinal day numbers, epoch timestamps, or any monotone key);
//!   positional reporting is used when no index is supplied.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on `structural_break`
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_breakpoints` module
//!   defined here and wraps its classes in user-facing Python APIs.
//! - External users are expected to interact with either the safe Rust APIs
//!   or the pure-Python wrappers; the PyO3 plumbing is considered internal.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration tests under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that classes can be
//!   constructed, called, and round-tripped correctly from Python.

pub mod structural_break;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    structural_break::{CusumOlsOutcome, CusumRecOutcome, SampleIndex, Series},
    utils::{extract_f64_array, extract_f64_matrix},
};

/// Build the labeled or positional `Series<i64>` used by the bindings.
#[cfg(feature = "python-bindings")]
fn build_series<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, index: Option<Vec<i64>>,
) -> PyResult<Series<i64>> {
    let y_arr = extract_f64_array(py, y)?;
    let values = y_arr.as_array().to_owned();
    let series = match index {
        Some(labels) => Series::with_labels(values, labels)?,
        None => Series::unlabeled(values),
    };
    Ok(series)
}

/// Flatten a `SampleIndex<i64>` into the integer the Python layer expects:
/// the caller's label when an index was supplied, the position otherwise.
#[cfg(feature = "python-bindings")]
fn flatten_index(index: &SampleIndex<i64>) -> i64 {
    match index {
        SampleIndex::Position(pos) => *pos as i64,
        SampleIndex::Label(label) => *label,
    }
}

/// CusumOLS — Python-facing wrapper for the OLS-CUSUM break test.
///
/// Purpose
/// -------
/// Represent the result of the OLS-CUSUM structural-break test when called
/// from Python, forwarding all computation to [`CusumOlsOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs (design matrix, response, and
///   optional integer index) into the core Rust types.
/// - Run the test via [`CusumOlsOutcome::cusum_ols`] and store the outcome
///   internally.
/// - Expose scalar accessors (`index`, `score`, `pvalue`, `significant`)
///   and the standardized CUSUM path as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `CusumOLS(x, y, alpha=0.05, index=None)`:
/// - `x`: `&PyAny`
///   Two-dimensional array-like of `float64` values, n observations by
///   p predictors.
/// - `y`: `&PyAny`
///   One-dimensional array-like of `float64` values of length n.
/// - `alpha`: `f64`
///   Significance level; defaults to 0.05 and must be one of 0.01, 0.05,
///   0.10 (the tabulated boundary-crossing levels).
/// - `index`: `Option<Vec<i64>>`
///   Optional length-n integer labels carried into the result.
///
/// Fields
/// ------
/// - `inner`: [`CusumOlsOutcome<i64>`]
///   Rust-side container holding the full test outcome used by the
///   accessors.
///
/// Notes
/// -----
/// - This type is intended to be used from Python; native Rust code should
///   prefer calling [`CusumOlsOutcome::cusum_ols`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_breakpoints.structural_break")]
pub struct CusumOLS {
    /// The OLS-CUSUM test outcome struct.
    inner: CusumOlsOutcome<i64>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CusumOLS {
    /// Run the OLS-CUSUM structural-break test.
    ///
    /// The break `index` is reported in the caller's index space when an
    /// integer index is supplied, positionally otherwise.
    #[new]
    #[pyo3(
        text_signature = "(x, y, /, alpha=0.05, index=None)",
        signature = (x, y, alpha = 0.05, index = None)
    )]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, alpha: f64,
        index: Option<Vec<i64>>,
    ) -> PyResult<CusumOLS> {
        let x_arr = extract_f64_matrix(py, x)?;
        let series = build_series(py, y, index)?;
        let result = CusumOlsOutcome::cusum_ols(x_arr.as_array(), &series, alpha)?;
        Ok(CusumOLS { inner: result })
    }

    /// Estimated break location (caller label or position).
    #[getter]
    pub fn index(&self) -> i64 {
        flatten_index(self.inner.index())
    }

    /// The OLS-CUSUM test score.
    #[getter]
    pub fn score(&self) -> f64 {
        self.inner.score()
    }

    /// The Kolmogorov asymptotic p-value of the score.
    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }

    /// Whether the score exceeds the tabulated critical value.
    #[getter]
    pub fn significant(&self) -> bool {
        self.inner.significant()
    }

    /// The standardized CUSUM path.
    #[getter]
    pub fn cusum(&self) -> Vec<f64> {
        self.inner.process().values().to_vec()
    }
}

/// CusumRecursive — Python-facing wrapper for the Rec-CUSUM break test.
///
/// Purpose
/// -------
/// Represent the result of the Recursive-CUSUM structural-break test when
/// called from Python, forwarding all computation to [`CusumRecOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into the core Rust types.
/// - Run the test via [`CusumRecOutcome::cusum_recursive`] and store the
///   outcome internally.
/// - Expose the score, p-value, significance flag, critical value, CUSUM
///   path, boundary, and exceedance indices as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `CusumRecursive(x, y, alpha=0.05, index=None)`; parameters mirror
/// [`CusumOLS`] except that any alpha strictly inside (0, 1) is accepted.
///
/// Fields
/// ------
/// - `inner`: [`CusumRecOutcome<i64>`]
///   Rust-side container holding the full test outcome.
///
/// Notes
/// -----
/// - Exceedance indices are reported in the caller's index space (labels
///   when supplied, positions otherwise); an empty list means the test did
///   not reject at the requested alpha.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_breakpoints.structural_break")]
pub struct CusumRecursive {
    /// The Rec-CUSUM test outcome struct.
    inner: CusumRecOutcome<i64>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CusumRecursive {
    /// Run the Recursive-CUSUM structural-break test.
    #[new]
    #[pyo3(
        text_signature = "(x, y, /, alpha=0.05, index=None)",
        signature = (x, y, alpha = 0.05, index = None)
    )]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, alpha: f64,
        index: Option<Vec<i64>>,
    ) -> PyResult<CusumRecursive> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(PyValueError::new_err(
                "alpha must lie strictly between 0 and 1",
            ));
        }
        let x_arr = extract_f64_matrix(py, x)?;
        let series = build_series(py, y, index)?;
        let result = CusumRecOutcome::cusum_recursive(x_arr.as_array(), &series, alpha)?;
        Ok(CusumRecursive { inner: result })
    }

    /// The boundary-weighted Rec-CUSUM test score.
    #[getter]
    pub fn score(&self) -> f64 {
        self.inner.score()
    }

    /// The Brownian-motion asymptotic p-value of the score.
    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }

    /// Whether the p-value falls below the requested alpha.
    #[getter]
    pub fn significant(&self) -> bool {
        self.inner.significant()
    }

    /// The critical value solved for the requested alpha.
    #[getter]
    pub fn crit(&self) -> f64 {
        self.inner.crit()
    }

    /// The origin-prepended standardized CUSUM path.
    #[getter]
    pub fn cusum(&self) -> Vec<f64> {
        self.inner.process().to_vec()
    }

    /// The time-varying critical boundary matching the path.
    #[getter]
    pub fn boundary(&self) -> Vec<f64> {
        self.inner.boundary().to_vec()
    }

    /// Samples whose path point crosses the boundary (labels when an index
    /// was supplied, positions otherwise).
    #[getter]
    pub fn exceedances(&self) -> Vec<i64> {
        self.inner.exceedances().iter().map(flatten_index).collect()
    }
}

/// _rust_breakpoints — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_breakpoints` Python module and register the
/// `structural_break` submodule used by the public `rust_breakpoints`
/// package.
///
/// Key behaviors
/// -------------
/// - Create the `structural_break` submodule and attach its classes.
/// - Register the submodule in `sys.modules` so it is importable via
///   `rust_breakpoints.structural_break`.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_breakpoints<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let structural_break_mod = PyModule::new(_py, "structural_break")?;
    structural_break_submodule(_py, m, &structural_break_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_breakpoints.structural_break", structural_break_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn structural_break_submodule<'py>(
    _py: Python, rust_breakpoints: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<CusumOLS>()?;
    m.add_class::<CusumRecursive>()?;
    rust_breakpoints.add_submodule(m)?;
    Ok(())
}
