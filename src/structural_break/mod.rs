//! structural_break — CUSUM-based structural-break detection.
//!
//! Purpose
//! -------
//! Detect structural breaks (change points) in sequential regression
//! relationships: given an ordered design matrix and response vector,
//! determine whether and where the underlying regression coefficients
//! shift. Two testing strategies share a common shape — compute a
//! standardized cumulative-sum process from regression residuals, reduce
//! it to a scalar statistic, and compare against a distributional
//! boundary — but differ in residual type, normalization, and
//! localization capability.
//!
//! Key behaviors
//! -------------
//! - Expose the full-sample OLS-CUSUM test via
//!   [`CusumOlsOutcome::cusum_ols`](ols::CusumOlsOutcome::cusum_ols):
//!   tabulated critical values, Kolmogorov asymptotic p-value, and a
//!   single localized break index.
//! - Expose the Recursive-CUSUM test via
//!   [`CusumRecOutcome::cusum_recursive`](recursive::CusumRecOutcome::cusum_recursive):
//!   solved critical values from the Brownian-motion asymptotics and a
//!   boundary-exceedance index set instead of a single break location.
//! - Carry caller-supplied index labels ([`Series`]) through to results
//!   so break locations come back in the caller's own index space.
//! - Centralize input guards in [`validation`] and failures in
//!   [`BreakError`]/[`BreakResult`], with Python bridges behind the
//!   `python-bindings` feature.
//!
//! Invariants & assumptions
//! ------------------------
//! - The engine is a pure, synchronous, stateless computation: no shared
//!   mutable state across invocations, no I/O, no randomness. Distinct
//!   invocations are safe to run concurrently.
//!   The only internal iteration — the critical-value bisection — is
//!   bracketed on [0, 20] and capped at 200 iterations.
//! - A test invocation either fully succeeds with an immutable outcome
//!   or fails atomically with a [`BreakError`]; nothing is retried.
//! - Degenerate zero-variance inputs produce defined non-significant
//!   outcomes, never errors or NaNs.
//!
//! Conventions
//! -----------
//! - The two variants are modeled as two outcome types rather than one
//!   unified function, since their result shapes (single break index vs
//!   exceedance set) are genuinely different contracts.
//! - The recursive residual recurrence is capability-abstracted behind
//!   [`ResidualBackend`](residuals::ResidualBackend); the selection
//!   never affects observable output.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use ndarray::{Array1, Array2};
//!   use rust_breakpoints::structural_break::{CusumOlsOutcome, Series};
//!
//!   let x = Array2::from_elem((30, 1), 1.0);
//!   let y = Series::from_values(Array1::from_iter((0..30).map(|t| t as f64)));
//!   let outcome = CusumOlsOutcome::cusum_ols(x.view(), &y, 0.05)?;
//!   # Ok::<(), rust_breakpoints::structural_break::BreakError>(())
//!   ```
//!
//!   and only refers to `errors`, `validation`, or `significance`
//!   directly when matching on [`BreakError`] or reusing the p-value
//!   machinery.
//! - Change-detection pipelines (per-pixel or per-segment record
//!   sources upstream, raster/map or table builders downstream) consume
//!   the outcomes; this subtree has no file-format or wire surface of
//!   its own.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; the end-to-end pipeline
//!   (level-shift power, null calibration, label round-trips) is covered
//!   by `tests/integration_break_detection.rs`.

pub mod cusum;
pub mod errors;
pub mod ols;
pub mod recursive;
pub mod residuals;
pub mod series;
pub mod significance;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{BreakError, BreakResult};
pub use self::ols::CusumOlsOutcome;
pub use self::recursive::CusumRecOutcome;
pub use self::residuals::ResidualBackend;
pub use self::series::{SampleIndex, Series};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_breakpoints::structural_break::prelude::*;
//
// to import the main break-testing surface in a single line.
pub mod prelude {
    pub use super::errors::{BreakError, BreakResult};
    pub use super::ols::CusumOlsOutcome;
    pub use super::recursive::CusumRecOutcome;
    pub use super::residuals::ResidualBackend;
    pub use super::series::{SampleIndex, Series};
    pub use super::significance::{brownian_motion_pvalue, kolmogorov_pvalue};
}
