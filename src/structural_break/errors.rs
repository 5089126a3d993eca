//! structural_break::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the structural-break
//! test routines, together with a conversion layer to Python exceptions
//! for PyO3-based bindings. This keeps validation and numerical failures
//! localized while exposing a clean error surface to both Rust and Python.
//!
//! Key behaviors
//! -------------
//! - Define [`BreakResult`] and [`BreakError`] as the canonical result and
//!   error types for the OLS-CUSUM and Recursive-CUSUM tests and their
//!   validation helpers.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<BreakError> for PyErr` to map Rust-side validation and
//!   numerical errors into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Test modules which use this error type validate their inputs (shapes,
//!   finiteness, alpha levels) and return [`BreakResult<T>`] instead of
//!   panicking.
//! - `BreakError` values are small, cheap to clone, and suitable for use in
//!   both unit tests and higher-level orchestration code.
//! - A test invocation either fully succeeds with a complete outcome or
//!   fails with one of these variants; partial results are never produced.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "alpha must be one of 0.01, 0.05, 0.10") rather than low-level
//!   implementation details.
//! - PyO3 conversion always uses `PyValueError` for these errors, with the
//!   Rust `Display` message preserved verbatim.
//!
//! Downstream usage
//! ----------------
//! - The OLS-CUSUM and Recursive-CUSUM entry points and the shared
//!   validation helpers return [`BreakResult<T>`] to propagate failures
//!   cleanly to callers.
//! - Python bindings expose constructors which raise `ValueError`
//!   instances; they do not pattern-match on [`BreakError`] directly.
//! - Higher-level Rust code may match on [`BreakError`] variants to
//!   implement custom recovery or logging behavior.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each [`BreakError`] variant's
//!   `Display` message embeds its payload (e.g., offending alpha or shape).
//! - The PyO3 conversion path is exercised by Python-level tests, not here.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type BreakResult<T> = Result<T, BreakError>;

/// BreakError — error conditions for the structural-break tests.
///
/// Purpose
/// -------
/// Represent all validation and computation failures that can occur when
/// running the OLS-CUSUM or Recursive-CUSUM structural-break tests,
/// including malformed inputs, singular design matrices, and root-finder
/// failures.
///
/// Variants
/// --------
/// - `DimensionMismatch(rows, obs)`
///   The design matrix has `rows` rows but the response vector has `obs`
///   observations; the two must agree.
/// - `IndexLengthMismatch(obs, labels)`
///   A label sequence of length `labels` was supplied for a series of
///   length `obs`.
/// - `InvalidData(value)`
///   A design-matrix or response element is non-finite (NaN or ±∞) and
///   cannot enter the least-squares or cumulative-sum computations.
/// - `RankDeficient(rank, params)`
///   The design matrix is singular or rank-deficient for OLS fitting
///   (`rank < params`); signaled rather than silently returning a
///   least-norm or NaN-filled solution.
/// - `InsufficientData(needed, actual)`
///   Too few observations for the requested computation, e.g. fewer than
///   `p + 2` rows for recursive residuals or fewer than 2 recursive
///   residuals for the variance estimate.
/// - `UnsupportedAlpha(alpha)`
///   OLS-CUSUM was invoked with a significance level outside the
///   tabulated set {0.01, 0.05, 0.10}, or either test received an alpha
///   outside the open interval (0, 1).
/// - `Numerical(context)`
///   The critical-value root-finder failed to bracket or converge within
///   its bounded iteration budget.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value or
///   shape pair) to allow downstream logging and debugging without
///   leaking large data structures.
/// - Degenerate zero-variance series are *not* errors; they produce a
///   defined non-significant outcome instead (see the test modules).
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation.
/// - A blanket [`From<BreakError> for PyErr`] implementation maps all of
///   these cases to `PyValueError` at the Python boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakError {
    //------ Input validation errors ------
    DimensionMismatch(usize, usize),
    IndexLengthMismatch(usize, usize),
    InvalidData(f64),
    InsufficientData(usize, usize),
    UnsupportedAlpha(f64),
    //------ Numerical errors ------
    RankDeficient(usize, usize),
    Numerical(&'static str),
}

impl std::error::Error for BreakError {}

impl std::fmt::Display for BreakError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakError::DimensionMismatch(rows, obs) => {
                write!(
                    f,
                    "Design matrix has {rows} rows but response vector has {obs} observations."
                )
            }
            BreakError::IndexLengthMismatch(obs, labels) => {
                write!(f, "Series of length {obs} was given {labels} index labels.")
            }
            BreakError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            BreakError::InsufficientData(needed, actual) => {
                write!(f, "Need at least {needed} observations, got {actual}.")
            }
            BreakError::UnsupportedAlpha(alpha) => {
                write!(
                    f,
                    "Unsupported significance level alpha = {alpha}. OLS-CUSUM supports \
                     0.01, 0.05, and 0.10; Recursive-CUSUM requires 0 < alpha < 1."
                )
            }
            BreakError::RankDeficient(rank, params) => {
                write!(
                    f,
                    "Design matrix is rank deficient: rank {rank} < {params} parameters."
                )
            }
            BreakError::Numerical(context) => write!(f, "Numerical failure: {context}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<BreakError> for PyErr {
    fn from(err: BreakError) -> PyErr {
        PyValueError::new_err(format!("BreakError: {err}"))
    }
}
