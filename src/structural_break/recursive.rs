//! structural_break::recursive — the Recursive-CUSUM structural-break test.
//!
//! Purpose
//! -------
//! Implement the Recursive-CUSUM (Rec-CUSUM) test of Brown, Durbin and
//! Evans: standardize the cumulative sum of recursive residuals from an
//! expanding-window fit and compare the boundary-weighted supremum against
//! the asymptotic Brownian-motion distribution. This variant answers "is
//! there a break somewhere" globally; instead of a single break index it
//! reports the set of samples whose path magnitude crosses the
//! time-varying critical boundary.
//!
//! Key behaviors
//! -------------
//! - Validate inputs, compute recursive residuals through the selected
//!   backend, build the origin-prepended standardized path, and reduce it
//!   to the weighted sup statistic.
//! - Map the statistic to a p-value through the closed-form
//!   Brownian-motion approximation (multiplicity 1), and solve the
//!   critical value for the caller's alpha by bounded bisection.
//! - When the test is significant, scan the path against the linear
//!   boundary `c + 2c·j/(m−1)` and report every exceedance, re-expressed
//!   in the caller's index space (path point j ≥ 1 corresponds to
//!   observation `p + j − 1`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Any alpha in the open interval (0, 1) is accepted; the critical
//!   value is solved, not tabulated.
//! - A zero-variance residual vector yields a defined non-significant
//!   outcome (all-zero path, score 0, p-value 1) rather than an error.
//! - The backend selection never changes observable results beyond
//!   floating-point noise.
//!
//! Conventions
//! -----------
//! - The exceedance set is empty for non-significant outcomes; the
//!   boundary scan only runs after the global test rejects.
//!
//! Downstream usage
//! ----------------
//! - Call [`CusumRecOutcome::cusum_recursive`] for the default backend or
//!   [`CusumRecOutcome::cusum_recursive_with`] to pin one explicitly
//!   (tests use the latter to cross-check backends). Callers needing a
//!   single localized break should use the OLS variant instead.
//!
//! Testing notes
//! -------------
//! - Unit tests cover level-shift rejection with exceedances mapped to
//!   observation space, the degenerate zero-variance series, and
//!   agreement of outcomes across backends.

use crate::structural_break::cusum::{recursive_process, recursive_statistic};
use crate::structural_break::errors::BreakResult;
use crate::structural_break::residuals::ResidualBackend;
use crate::structural_break::series::{SampleIndex, Series};
use crate::structural_break::significance::{
    brownian_motion_pvalue, recursive_boundary, recursive_critical_value,
};
use crate::structural_break::validation::{validate_alpha, validate_design};
use ndarray::{Array1, ArrayView2};

/// CusumRecOutcome — outcome of the Recursive-CUSUM structural-break test.
///
/// Purpose
/// -------
/// Package the test score, Brownian-motion p-value, significance flag,
/// solved critical value, standardized path, and boundary-exceedance set
/// of a single Rec-CUSUM invocation.
///
/// Parameters
/// ----------
/// Constructed via [`CusumRecOutcome::cusum_recursive`] (default
/// backend) or [`CusumRecOutcome::cusum_recursive_with`]:
/// - `x`: `ArrayView2<f64>`
///   n×p design matrix with `n ≥ p + 2` finite entries.
/// - `y`: `&Series<L>`
///   Length-n response, optionally labeled.
/// - `alpha`: `f64`
///   Significance level in (0, 1).
///
/// Fields
/// ------
/// - `score`: `f64`
///   Boundary-weighted supremum of the standardized path.
/// - `p_value`: `f64`
///   Closed-form Brownian-motion p-value of the score (k = 1).
/// - `significant`: `bool`
///   Whether `p_value < alpha`.
/// - `crit`: `f64`
///   Critical value solved for the caller's alpha; parametrizes the
///   boundary.
/// - `process`: `Array1<f64>`
///   Origin-prepended path of length n − p + 1.
/// - `exceedances`: `Vec<SampleIndex<L>>`
///   Observations whose path point crosses the boundary, in the
///   caller's index space; empty for non-significant outcomes.
///
/// Invariants
/// ----------
/// - Created once per invocation and never mutated afterwards.
/// - `score >= 0`, `p_value` in [0, 1], `crit > 0`.
///
/// Notes
/// -----
/// - The exceedance set may contain several samples; this variant
///   deliberately does not collapse them to a single break location.
#[derive(Debug, Clone)]
pub struct CusumRecOutcome<L> {
    score: f64,
    p_value: f64,
    significant: bool,
    crit: f64,
    process: Array1<f64>,
    exceedances: Vec<SampleIndex<L>>,
}

impl<L: Clone> CusumRecOutcome<L> {
    /// Run the Recursive-CUSUM test with the default residual backend.
    ///
    /// See [`CusumRecOutcome::cusum_recursive_with`] for the full
    /// contract; this convenience entry uses
    /// [`ResidualBackend::default`].
    pub fn cusum_recursive(
        x: ArrayView2<'_, f64>, y: &Series<L>, alpha: f64,
    ) -> BreakResult<Self> {
        Self::cusum_recursive_with(x, y, alpha, ResidualBackend::default())
    }

    /// Run the Recursive-CUSUM test with an explicit residual backend.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `ArrayView2<f64>`
    ///   n×p design matrix with `n ≥ p + 2` finite entries.
    /// - `y`: `&Series<L>`
    ///   Length-n response aligned to the rows of `x`.
    /// - `alpha`: `f64`
    ///   Significance level in the open interval (0, 1).
    /// - `backend`: [`ResidualBackend`]
    ///   Recursive-residual implementation; functionally transparent.
    ///
    /// Returns
    /// -------
    /// `BreakResult<CusumRecOutcome<L>>`
    ///   The assembled outcome, or the first validation / numerical
    ///   error. A call either fully succeeds or fails atomically.
    ///
    /// Errors
    /// ------
    /// - `BreakError::DimensionMismatch` / `InsufficientData` /
    ///   `InvalidData`
    ///   Shape or finiteness violations; recursive residuals require at
    ///   least `p + 2` observations.
    /// - `BreakError::UnsupportedAlpha`
    ///   Alpha outside (0, 1).
    /// - `BreakError::RankDeficient`
    ///   The initial `p × p` window does not identify the parameters.
    /// - `BreakError::Numerical`
    ///   Critical-value solve or the recursive recurrence failed
    ///   numerically.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use ndarray::{Array1, Array2};
    /// use rust_breakpoints::structural_break::{CusumRecOutcome, Series};
    ///
    /// let n = 50;
    /// let x = Array2::from_elem((n, 1), 1.0);
    /// let y = Series::from_values(Array1::from_iter(
    ///     (0..n).map(|t| if t < n / 2 { 0.0 } else { 8.0 }),
    /// ));
    ///
    /// let outcome = CusumRecOutcome::cusum_recursive(x.view(), &y, 0.05).unwrap();
    /// assert!(outcome.significant());
    /// assert!(!outcome.exceedances().is_empty());
    /// ```
    pub fn cusum_recursive_with(
        x: ArrayView2<'_, f64>, y: &Series<L>, alpha: f64, backend: ResidualBackend,
    ) -> BreakResult<Self> {
        validate_alpha(alpha)?;
        let crit = recursive_critical_value(alpha)?;

        let p = x.ncols();
        validate_design(x, y.values().view(), p + 2)?;

        let w = backend.recursive_residuals(x, y.values().view(), p)?;
        let process = recursive_process(w.view(), y.len(), p)?;
        let score = recursive_statistic(process.view());
        let p_value = brownian_motion_pvalue(score, 1);
        let significant = p_value < alpha;

        let exceedances = if significant {
            let boundary = recursive_boundary(crit, process.len());
            process
                .iter()
                .enumerate()
                .skip(1) // the origin sits below the boundary by construction
                .filter(|(j, v)| v.abs() > boundary[*j])
                .map(|(j, _)| y.sample_index(p + j - 1))
                .collect()
        } else {
            Vec::new()
        };

        Ok(CusumRecOutcome { score, p_value, significant, crit, process, exceedances })
    }

    /// Boundary-weighted supremum of the standardized path.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Brownian-motion asymptotic p-value of [`score`](Self::score).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Whether `p_value < alpha`.
    pub fn significant(&self) -> bool {
        self.significant
    }

    /// Critical value solved for the requested alpha.
    pub fn crit(&self) -> f64 {
        self.crit
    }

    /// The origin-prepended standardized path (length n − p + 1).
    pub fn process(&self) -> &Array1<f64> {
        &self.process
    }

    /// Samples whose path point crosses the critical boundary, in the
    /// caller's index space. Empty for non-significant outcomes.
    pub fn exceedances(&self) -> &[SampleIndex<L>] {
        &self.exceedances
    }

    /// The time-varying critical boundary matching [`process`](Self::process).
    pub fn boundary(&self) -> Array1<f64> {
        recursive_boundary(self.crit, self.process.len())
    }
}
