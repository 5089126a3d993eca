//! structural_break::validation — shared input guards for break tests.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the structural-break test
//! routines. This avoids duplicating checks on design/response shape
//! agreement, data finiteness, minimum observation counts, and
//! significance levels across the two test variants.
//!
//! Key behaviors
//! -------------
//! - Enforce simple preconditions on the design matrix and response
//!   vector before any least-squares work is performed.
//! - Map invalid inputs into structured [`BreakError`] values for
//!   consistent error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - The design matrix must have as many rows as the response has
//!   observations, and strictly more rows than columns.
//! - All design and response values must be finite (no NaN, no ±∞).
//! - Significance levels lie in the open interval (0, 1); the OLS-CUSUM
//!   table lookup applies its own stricter membership check downstream.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and
//!   allocates nothing.
//! - Label-length agreement is enforced at `Series` construction and is
//!   not re-checked here.
//!
//! Downstream usage
//! ----------------
//! - The OLS-CUSUM and Recursive-CUSUM entry points call
//!   [`validate_design`] and [`validate_alpha`] before computing
//!   residuals. A successful return guarantees the shape and finiteness
//!   constraints hold.
//!
//! Testing notes
//! -------------
//! - Unit tests cover all error branches of both guards and a simple
//!   success path.

use crate::structural_break::errors::{BreakError, BreakResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate shape and finiteness constraints for a break-test input pair.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView2<f64>`
///   Design matrix with one row per observation and one column per
///   regression parameter (including any intercept column the caller
///   wants modeled).
/// - `y`: `ArrayView1<f64>`
///   Response vector aligned by position to the rows of `x`.
/// - `min_obs`: `usize`
///   Minimum number of observations required by the calling test, e.g.
///   `p + 1` for an OLS fit with `p` parameters or `p + 2` for recursive
///   residuals.
///
/// Returns
/// -------
/// `BreakResult<()>`
///   - `Ok(())` if all constraints are satisfied.
///   - `Err(BreakError)` otherwise, with a variant encoding which
///     condition failed and the offending values.
///
/// Errors
/// ------
/// - `BreakError::DimensionMismatch(rows, obs)`
///   Returned when `x.nrows() != y.len()`.
/// - `BreakError::InsufficientData(needed, actual)`
///   Returned when `y.len() < min_obs`.
/// - `BreakError::InvalidData(value)`
///   Returned when any design or response element is not finite, with
///   `value` set to the offending entry.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `BreakError`.
///
/// Notes
/// -----
/// - Rank deficiency cannot be detected by shape inspection and is
///   signaled by the residual engine during factorization instead.
///
/// Examples
/// --------
/// ```rust
/// # use rust_breakpoints::structural_break::validation::validate_design;
/// # use rust_breakpoints::structural_break::errors::BreakError;
/// use ndarray::{array, Array2};
///
/// let x = Array2::from_shape_vec((3, 1), vec![1.0, 1.0, 1.0]).unwrap();
/// let y = array![0.1, -0.2, 0.3];
///
/// // Valid inputs succeed:
/// assert!(validate_design(x.view(), y.view(), 2).is_ok());
///
/// // A row/observation disagreement is a DimensionMismatch:
/// let y_short = array![0.1, -0.2];
/// match validate_design(x.view(), y_short.view(), 2) {
///     Err(BreakError::DimensionMismatch(3, 2)) => (),
///     other => panic!("expected DimensionMismatch, got {other:?}"),
/// }
/// ```
pub fn validate_design(
    x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, min_obs: usize,
) -> BreakResult<()> {
    if x.nrows() != y.len() {
        return Err(BreakError::DimensionMismatch(x.nrows(), y.len()));
    }

    if y.len() < min_obs {
        return Err(BreakError::InsufficientData(min_obs, y.len()));
    }

    for &value in x.iter().chain(y.iter()) {
        if !value.is_finite() {
            return Err(BreakError::InvalidData(value));
        }
    }

    Ok(())
}

/// Validate that a significance level lies in the open interval (0, 1).
///
/// Parameters
/// ----------
/// - `alpha`: `f64`
///   Caller-chosen significance level.
///
/// Returns
/// -------
/// `BreakResult<()>`
///   `Ok(())` when `0 < alpha < 1`, otherwise
///   `Err(BreakError::UnsupportedAlpha(alpha))`.
///
/// Notes
/// -----
/// - The OLS-CUSUM variant additionally restricts alpha to the tabulated
///   set {0.01, 0.05, 0.10} via
///   [`ols_critical_value`](crate::structural_break::significance::ols_critical_value);
///   this guard only rejects levels for which no test is meaningful.
pub fn validate_alpha(alpha: f64) -> BreakResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(BreakError::UnsupportedAlpha(alpha));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of well-formed inputs.
    // - Each error branch of `validate_design`:
    //   * row/observation mismatch,
    //   * insufficient observations,
    //   * non-finite design or response values.
    // - Both rejection branches of `validate_alpha`.
    //
    // They intentionally DO NOT cover:
    // - Rank-deficiency detection, which happens inside the residual
    //   engine during factorization.
    // -------------------------------------------------------------------------

    fn ones_column(n: usize) -> Array2<f64> {
        Array2::from_elem((n, 1), 1.0)
    }

    #[test]
    // Purpose
    // -------
    // Verify that a well-formed design/response pair passes validation.
    //
    // Given
    // -----
    // - A 4x1 intercept design and a length-4 finite response.
    //
    // Expect
    // ------
    // - `validate_design` returns `Ok(())`.
    fn validate_design_accepts_well_formed_inputs() {
        // Arrange
        let x = ones_column(4);
        let y = array![0.1, -0.2, 0.3, -0.4];

        // Act & Assert
        assert!(validate_design(x.view(), y.view(), 3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a row/observation disagreement is reported as a
    // `DimensionMismatch` carrying both counts.
    //
    // Given
    // -----
    // - A 4x1 design and a length-3 response.
    //
    // Expect
    // ------
    // - `Err(BreakError::DimensionMismatch(4, 3))`.
    fn validate_design_rejects_row_observation_mismatch() {
        // Arrange
        let x = ones_column(4);
        let y = array![0.1, -0.2, 0.3];

        // Act
        let result = validate_design(x.view(), y.view(), 2);

        // Assert
        assert_eq!(result, Err(BreakError::DimensionMismatch(4, 3)));
    }

    #[test]
    // Purpose
    // -------
    // Verify that too few observations for the requested minimum are
    // reported as `InsufficientData`.
    //
    // Given
    // -----
    // - A 2x1 design/response pair and a minimum of 3 observations.
    //
    // Expect
    // ------
    // - `Err(BreakError::InsufficientData(3, 2))`.
    fn validate_design_rejects_insufficient_observations() {
        // Arrange
        let x = ones_column(2);
        let y = array![0.1, -0.2];

        // Act
        let result = validate_design(x.view(), y.view(), 3);

        // Assert
        assert_eq!(result, Err(BreakError::InsufficientData(3, 2)));
    }

    #[test]
    // Purpose
    // -------
    // Verify that non-finite values in either input surface as
    // `InvalidData` rather than propagating NaNs into the fit.
    //
    // Given
    // -----
    // - A design containing NaN, and separately a response containing
    //   +∞.
    //
    // Expect
    // ------
    // - Both calls return `Err(BreakError::InvalidData(_))`.
    fn validate_design_rejects_non_finite_values() {
        // Arrange
        let mut x = ones_column(3);
        x[(1, 0)] = f64::NAN;
        let y = array![0.1, -0.2, 0.3];

        // Act & Assert: NaN in the design
        assert!(matches!(
            validate_design(x.view(), y.view(), 2),
            Err(BreakError::InvalidData(_))
        ));

        // Act & Assert: infinity in the response
        let x_ok = ones_column(3);
        let y_inf = array![0.1, f64::INFINITY, 0.3];
        assert!(matches!(
            validate_design(x_ok.view(), y_inf.view(), 2),
            Err(BreakError::InvalidData(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the alpha guard accepts interior levels and rejects the
    // boundaries and exterior values.
    //
    // Given
    // -----
    // - Alphas 0.05 (valid), 0.0, 1.0, and -0.1 (all invalid).
    //
    // Expect
    // ------
    // - Only 0.05 passes; the rest return `UnsupportedAlpha`.
    fn validate_alpha_accepts_interior_and_rejects_boundaries() {
        // Act & Assert
        assert!(validate_alpha(0.05).is_ok());
        for bad in [0.0, 1.0, -0.1] {
            assert_eq!(validate_alpha(bad), Err(BreakError::UnsupportedAlpha(bad)));
        }
    }
}
