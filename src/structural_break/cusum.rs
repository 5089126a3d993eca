//! structural_break::cusum — CUSUM process builders and statistic reducers.
//!
//! Purpose
//! -------
//! Turn residual vectors into standardized cumulative-sum paths and reduce
//! those paths to scalar test statistics. The two test variants share the
//! partial-sum shape but differ in normalization, in whether an origin is
//! prepended, and in whether the reducer localizes a break.
//!
//! Key behaviors
//! -------------
//! - [`ols_process`]: `cumsum(r) / σ` with
//!   `σ = √(Σr² / (n − ddof) · n)`; a zero σ (perfect fit) yields an
//!   all-zero path so downstream significance is trivially negative.
//! - [`recursive_process`]: prepends an origin 0 to the recursive
//!   residuals and scales by `σ_w · √(n − span)` with the sample standard
//!   deviation σ_w (ddof = 1); requires at least two residuals.
//! - [`ols_statistic`]: sup-norm of the path plus the first position
//!   attaining it (ties resolve to the earliest sample).
//! - [`recursive_statistic`]: drops the origin, rescales point j by
//!   `1 / (1 + 2·j/m)`, and takes the sup-norm; no localization.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residual inputs are finite; degenerate zero-variance inputs are
//!   handled here (all-zero path), never upstream.
//! - Paths are deterministic functions of their inputs; there is no
//!   hidden state.
//!
//! Downstream usage
//! ----------------
//! - `structural_break::ols` pairs [`ols_process`] with [`ols_statistic`];
//!   `structural_break::recursive` pairs [`recursive_process`] with
//!   [`recursive_statistic`] and the boundary machinery in
//!   `structural_break::significance`.
//!
//! Testing notes
//! -------------
//! - Unit tests pin down hand-computed paths, the zero-σ degenerate
//!   cases, first-occurrence tie handling, and the weight rescaling of
//!   the recursive reducer.

use crate::structural_break::errors::{BreakError, BreakResult};
use ndarray::{Array1, ArrayView1};

/// Build the standardized OLS-CUSUM path from full-sample residuals.
///
/// Parameters
/// ----------
/// - `resid`: `ArrayView1<f64>`
///   Length-n OLS residual vector.
/// - `ddof`: `usize`
///   Degrees-of-freedom adjustment: the number of regression parameters
///   consumed by the fit. Must satisfy `ddof < n`.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Length-n path `process[j] = Σ_{t ≤ j} r_t / σ` with
///   `σ = √(Σr² / (n − ddof) · n)`. When σ = 0 (the residuals vanish
///   identically) the path is all zeros.
///
/// Panics
/// ------
/// - Panics if `ddof >= n`; entry points enforce `n ≥ p + 1` before
///   calling.
pub fn ols_process(resid: ArrayView1<'_, f64>, ddof: usize) -> Array1<f64> {
    let n = resid.len();
    let df = n - ddof;

    let sigma = (resid.iter().map(|r| r * r).sum::<f64>() / df as f64 * n as f64).sqrt();
    if sigma == 0.0 {
        return Array1::zeros(n);
    }

    let mut cumsum = 0.0;
    Array1::from_iter(resid.iter().map(|r| {
        cumsum += r;
        cumsum / sigma
    }))
}

/// Build the standardized Recursive-CUSUM path from recursive residuals.
///
/// Parameters
/// ----------
/// - `w`: `ArrayView1<f64>`
///   Length-(n − span) recursive residual vector.
/// - `n`: `usize`
///   Number of original observations.
/// - `span`: `usize`
///   Initial-window size used when computing `w` (normally the parameter
///   count p).
///
/// Returns
/// -------
/// `BreakResult<Array1<f64>>`
///   Length-(n − span + 1) path starting at an explicit origin 0:
///   `process[j] = Σ_{t < j} w_t / (σ_w · √(n − span))` with σ_w the
///   sample standard deviation of `w` (ddof = 1). When σ_w = 0 the path
///   is all zeros.
///
/// Errors
/// ------
/// - `BreakError::InsufficientData(2, m)`
///   Fewer than two recursive residuals, so the sample standard
///   deviation is undefined.
pub fn recursive_process(
    w: ArrayView1<'_, f64>, n: usize, span: usize,
) -> BreakResult<Array1<f64>> {
    let m = w.len();
    if m < 2 {
        return Err(BreakError::InsufficientData(2, m));
    }

    let mean = w.iter().sum::<f64>() / m as f64;
    let var = w.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (m - 1) as f64;
    let sigma = var.sqrt();
    if sigma == 0.0 {
        return Ok(Array1::zeros(m + 1));
    }

    let scale = sigma * ((n - span) as f64).sqrt();
    let mut process = Vec::with_capacity(m + 1);
    process.push(0.0);
    let mut cumsum = 0.0;
    for v in w.iter() {
        cumsum += v;
        process.push(cumsum / scale);
    }
    Ok(Array1::from_vec(process))
}

/// Reduce an OLS-CUSUM path to its sup-norm score and break position.
///
/// Parameters
/// ----------
/// - `process`: `ArrayView1<f64>`
///   Standardized CUSUM path of length ≥ 1.
///
/// Returns
/// -------
/// `(f64, usize)`
///   The maximum absolute path value and the first position attaining
///   it. The position is the estimated break location in observation
///   space.
///
/// Notes
/// -----
/// - Ties resolve to the earliest sample by only updating on a strictly
///   larger magnitude.
pub fn ols_statistic(process: ArrayView1<'_, f64>) -> (f64, usize) {
    let mut score = 0.0;
    let mut idx = 0;
    for (j, v) in process.iter().enumerate() {
        let mag = v.abs();
        if mag > score {
            score = mag;
            idx = j;
        }
    }
    (score, idx)
}

/// Reduce a Recursive-CUSUM path to its boundary-weighted sup statistic.
///
/// Parameters
/// ----------
/// - `process`: `ArrayView1<f64>`
///   Origin-prepended path from [`recursive_process`].
///
/// Returns
/// -------
/// `f64`
///   `max_j |process[j] / (1 + 2·j/m)|` over the m non-origin points,
///   where `j/m` runs over `(1..=m)/m`. Zero when the path has no
///   non-origin points.
///
/// Notes
/// -----
/// - No break position is produced: this statistic answers "is there a
///   break somewhere" without localizing it. Localization under this
///   variant happens through the boundary-exceedance set instead.
pub fn recursive_statistic(process: ArrayView1<'_, f64>) -> f64 {
    let m = process.len().saturating_sub(1);
    if m == 0 {
        return 0.0;
    }

    let mut score = 0.0_f64;
    for j in 1..=m {
        let weight = 1.0 + 2.0 * (j as f64 / m as f64);
        let mag = (process[j] / weight).abs();
        if mag > score {
            score = mag;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Hand-computed OLS and recursive paths on tiny inputs.
    // - All-zero degenerate paths when the residual variance vanishes.
    // - First-occurrence tie resolution in `ols_statistic`.
    // - The weight rescaling in `recursive_statistic`.
    //
    // They intentionally DO NOT cover:
    // - Residual computation (covered in `residuals`) or significance
    //   mapping (covered in `significance`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify `ols_process` against a hand computation.
    //
    // Given
    // -----
    // - Residuals [1, -1, 1, -1] with ddof = 1, so
    //   σ = √(4 / 3 · 4) = √(16/3).
    //
    // Expect
    // ------
    // - The path equals cumsum/σ = [1, 0, 1, 0]/σ.
    fn ols_process_matches_hand_computation() {
        // Arrange
        let resid = array![1.0, -1.0, 1.0, -1.0];
        let sigma = (16.0_f64 / 3.0).sqrt();

        // Act
        let process = ols_process(resid.view(), 1);

        // Assert
        let expected = [1.0 / sigma, 0.0, 1.0 / sigma, 0.0];
        for (got, want) in process.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "expected {want}, got {got}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a perfectly fit series (all-zero residuals) produces an
    // all-zero path instead of NaNs.
    //
    // Given
    // -----
    // - Five zero residuals with ddof = 1.
    //
    // Expect
    // ------
    // - A length-5 all-zero path.
    fn ols_process_zero_variance_yields_zero_path() {
        // Arrange
        let resid = Array1::zeros(5);

        // Act
        let process = ols_process(resid.view(), 1);

        // Assert
        assert_eq!(process.len(), 5);
        assert!(process.iter().all(|v| *v == 0.0), "path should be all zeros");
    }

    #[test]
    // Purpose
    // -------
    // Verify the origin prepend, scaling, and length of the recursive
    // path.
    //
    // Given
    // -----
    // - Residuals w = [1, -1, 2] with mean 2/3 and sample variance
    //   7/3, for n = 5, span = 2.
    //
    // Expect
    // ------
    // - Length 4, first entry 0, remaining entries
    //   cumsum(w) / (σ_w · √3).
    fn recursive_process_prepends_origin_and_scales() {
        // Arrange
        let w = array![1.0, -1.0, 2.0];
        let sigma = (7.0_f64 / 3.0).sqrt();
        let scale = sigma * 3.0_f64.sqrt();

        // Act
        let process = recursive_process(w.view(), 5, 2).expect("three residuals suffice");

        // Assert
        assert_eq!(process.len(), 4);
        assert_eq!(process[0], 0.0);
        let expected = [1.0 / scale, 0.0, 2.0 / scale];
        for (got, want) in process.iter().skip(1).zip(expected) {
            assert!((got - want).abs() < 1e-12, "expected {want}, got {got}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate branches of `recursive_process`: too few
    // residuals error out, and zero-variance residuals give a defined
    // all-zero path.
    //
    // Given
    // -----
    // - A single residual, and separately three identical residuals.
    //
    // Expect
    // ------
    // - `Err(BreakError::InsufficientData(2, 1))` for the singleton.
    // - An all-zero length-4 path for the constant residuals.
    fn recursive_process_handles_degenerate_inputs() {
        // Arrange
        let single = array![1.0];
        let constant = array![0.5, 0.5, 0.5];

        // Act & Assert: one residual cannot yield a variance
        assert_eq!(
            recursive_process(single.view(), 3, 2),
            Err(BreakError::InsufficientData(2, 1))
        );

        // Act & Assert: zero variance yields a defined all-zero path
        let process =
            recursive_process(constant.view(), 5, 2).expect("constant residuals are not an error");
        assert_eq!(process.len(), 4);
        assert!(process.iter().all(|v| *v == 0.0), "path should be all zeros");
    }

    #[test]
    // Purpose
    // -------
    // Verify sup-norm reduction and first-occurrence tie handling.
    //
    // Given
    // -----
    // - A path [0.5, -2.0, 1.0, 2.0] where |−2.0| ties |2.0|.
    //
    // Expect
    // ------
    // - Score 2.0 at position 1 (the earlier of the tied samples).
    fn ols_statistic_resolves_ties_to_first_occurrence() {
        // Arrange
        let process = array![0.5, -2.0, 1.0, 2.0];

        // Act
        let (score, idx) = ols_statistic(process.view());

        // Assert
        assert_eq!(score, 2.0);
        assert_eq!(idx, 1);
    }

    #[test]
    // Purpose
    // -------
    // Verify the recursive reducer's weight rescaling: point j is divided
    // by 1 + 2·j/m before the sup is taken.
    //
    // Given
    // -----
    // - The path [0, 3, 3] (origin plus m = 2 points), so the rescaled
    //   magnitudes are 3/2 and 3/3 = 1.
    //
    // Expect
    // ------
    // - Score 1.5, coming from the first non-origin point.
    fn recursive_statistic_applies_boundary_weights() {
        // Arrange
        let process = array![0.0, 3.0, 3.0];

        // Act
        let score = recursive_statistic(process.view());

        // Assert
        assert!((score - 1.5).abs() < 1e-12, "expected 1.5, got {score}");
    }
}
