//! structural_break::ols — the OLS-CUSUM structural-break test.
//!
//! Purpose
//! -------
//! Implement the full-sample OLS-CUSUM test of Ploberger and Krämer
//! (1992): fit the whole series by ordinary least squares, standardize the
//! cumulative sum of the residuals, and compare its supremum against
//! tabulated Kolmogorov-Smirnov-type critical values. Unlike the recursive
//! variant, this test localizes the break: the position of the supremum is
//! the estimated change point.
//!
//! Key behaviors
//! -------------
//! - Validate inputs, compute OLS residuals, build the standardized CUSUM
//!   path, and reduce it to a score plus break position.
//! - Report the Kolmogorov two-sided asymptotic survival probability of
//!   the score as the p-value, and flag significance by strict comparison
//!   against the tabulated critical value for the caller's alpha.
//! - Re-express the break position and the CUSUM path in the caller's
//!   index space when the response carried labels.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only alphas 0.01, 0.05, and 0.10 are accepted; others surface as
//!   [`BreakError::UnsupportedAlpha`] with no interpolation.
//! - A perfectly fit series yields score 0, p-value 1, and a
//!   non-significant outcome rather than an error.
//! - The outcome is immutable after construction and never aliases
//!   caller-owned inputs.
//!
//! Conventions
//! -----------
//! - The computation is pure and synchronous: concurrent invocations on
//!   distinct inputs are safe with no shared state.
//!
//! Downstream usage
//! ----------------
//! - Call [`CusumOlsOutcome::cusum_ols`] with a design matrix, a
//!   [`Series`] (labeled or not), and a tabulated alpha. Change-detection
//!   pipelines consume the break index, score, p-value, and significance
//!   flag; the path is available for plotting or secondary screening.
//!
//! Testing notes
//! -------------
//! - Unit tests cover break detection and localization under a level
//!   shift, labeled-input round-trips, the degenerate zero-residual
//!   series, and the unsupported-alpha rejection. Calibration under the
//!   null is exercised in the integration tests.

use crate::structural_break::cusum::{ols_process, ols_statistic};
use crate::structural_break::errors::BreakResult;
use crate::structural_break::residuals::ols_residuals;
use crate::structural_break::series::{SampleIndex, Series};
use crate::structural_break::significance::{kolmogorov_pvalue, ols_critical_value};
use crate::structural_break::validation::{validate_alpha, validate_design};
use ndarray::ArrayView2;

/// CusumOlsOutcome — outcome of the OLS-CUSUM structural-break test.
///
/// Purpose
/// -------
/// Package the estimated break location, test score, p-value,
/// significance flag, and the standardized CUSUM path of a single
/// OLS-CUSUM invocation, with locations re-expressed in the caller's
/// index space.
///
/// Parameters
/// ----------
/// Constructed via [`CusumOlsOutcome::cusum_ols`]:
/// - `x`: `ArrayView2<f64>`
///   n×p design matrix (rows ordered, any intercept column included
///   explicitly by the caller).
/// - `y`: `&Series<L>`
///   Length-n response, optionally labeled.
/// - `alpha`: `f64`
///   Significance level; one of 0.01, 0.05, 0.10.
///
/// Fields
/// ------
/// - `index`: [`SampleIndex<L>`]
///   Estimated break location: the first position maximizing the
///   absolute path, as a position or caller label.
/// - `score`: `f64`
///   Supremum of the absolute standardized CUSUM path; non-negative.
/// - `process`: [`Series<L>`]
///   The length-n path, carrying the caller's labels when present.
/// - `p_value`: `f64`
///   Kolmogorov two-sided asymptotic survival probability of the score,
///   in [0, 1].
/// - `significant`: `bool`
///   Whether the score strictly exceeds the tabulated critical value at
///   the requested alpha.
///
/// Invariants
/// ----------
/// - Created once per invocation and never mutated afterwards.
/// - `score >= 0` and `p_value` lies in [0, 1] whenever construction
///   succeeds.
///
/// Performance
/// -----------
/// - Owns its path; the caller's inputs are only borrowed during
///   construction.
///
/// Notes
/// -----
/// - Accessor methods keep the layout private so the binding surface
///   does not depend on field order.
#[derive(Debug, Clone)]
pub struct CusumOlsOutcome<L> {
    index: SampleIndex<L>,
    score: f64,
    process: Series<L>,
    p_value: f64,
    significant: bool,
}

impl<L: Clone> CusumOlsOutcome<L> {
    /// Run the OLS-CUSUM structural-break test.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `ArrayView2<f64>`
    ///   n×p design matrix with `n ≥ p + 1` finite entries.
    /// - `y`: `&Series<L>`
    ///   Length-n response aligned to the rows of `x`; labels, when
    ///   present, are carried into the outcome.
    /// - `alpha`: `f64`
    ///   Significance level; must be one of 0.01, 0.05, or 0.10.
    ///
    /// Returns
    /// -------
    /// `BreakResult<CusumOlsOutcome<L>>`
    ///   The assembled outcome, or the first validation / numerical
    ///   error. A call either fully succeeds or fails atomically;
    ///   partial results are never returned.
    ///
    /// Errors
    /// ------
    /// - `BreakError::DimensionMismatch` / `InsufficientData` /
    ///   `InvalidData`
    ///   Shape or finiteness violations from `validate_design`.
    /// - `BreakError::UnsupportedAlpha`
    ///   Alpha outside the tabulated set.
    /// - `BreakError::RankDeficient`
    ///   Singular design matrix.
    ///
    /// Panics
    /// ------
    /// - Never panics on user-facing invalid input; all failures surface
    ///   as `BreakError`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::{Array1, Array2};
    /// use rust_breakpoints::structural_break::{CusumOlsOutcome, Series};
    ///
    /// // Level shift halfway through an intercept-only series.
    /// let n = 40;
    /// let x = Array2::from_elem((n, 1), 1.0);
    /// let y = Series::from_values(Array1::from_iter(
    ///     (0..n).map(|t| if t < n / 2 { 0.0 } else { 5.0 }),
    /// ));
    ///
    /// let outcome = CusumOlsOutcome::cusum_ols(x.view(), &y, 0.05).unwrap();
    /// assert!(outcome.significant());
    /// assert!((0.0..=1.0).contains(&outcome.p_value()));
    /// ```
    pub fn cusum_ols(
        x: ArrayView2<'_, f64>, y: &Series<L>, alpha: f64,
    ) -> BreakResult<Self> {
        validate_alpha(alpha)?;
        let crit = ols_critical_value(alpha)?;

        let p = x.ncols();
        validate_design(x, y.values().view(), p + 1)?;

        let resid = ols_residuals(x, y.values().view())?;
        let process = ols_process(resid.view(), p);
        let (score, idx) = ols_statistic(process.view());
        let p_value = kolmogorov_pvalue(score);

        Ok(CusumOlsOutcome {
            index: y.sample_index(idx),
            score,
            process: y.relabel(process),
            p_value,
            significant: score > crit,
        })
    }

    /// Estimated break location in the caller's index space.
    pub fn index(&self) -> &SampleIndex<L> {
        &self.index
    }

    /// Supremum of the absolute standardized CUSUM path.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// The standardized CUSUM path, labeled like the input series.
    pub fn process(&self) -> &Series<L> {
        &self.process
    }

    /// Kolmogorov asymptotic p-value of [`score`](Self::score).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Whether the score exceeds the tabulated critical value.
    pub fn significant(&self) -> bool {
        self.significant
    }
}
