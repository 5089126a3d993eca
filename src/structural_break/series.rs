//! structural_break::series — tagged response series with optional labels.
//!
//! Purpose
//! -------
//! Provide the input carrier for structural-break tests: a numeric response
//! vector together with an optional ordered label sequence (ordinal day
//! numbers, timestamps, or arbitrary orderable identifiers). Collapsing
//! labeled and unlabeled inputs into one explicit tagged structure gives
//! the test entry points a single code path instead of ad hoc case analysis
//! over caller container types.
//!
//! Key behaviors
//! -------------
//! - Validate at construction that the label sequence, when present, has
//!   exactly one label per observation.
//! - Re-express positional indices in the caller's label space via
//!   [`SampleIndex`], so test outcomes can report break locations using
//!   whatever indexing scheme the caller supplied.
//!
//! Invariants & assumptions
//! ------------------------
//! - `labels.len() == values.len()` whenever labels are present; enforced
//!   by [`Series::with_labels`] and never re-checked downstream.
//! - A `Series` is immutable after construction; test routines borrow it
//!   and never mutate caller-owned inputs.
//!
//! Conventions
//! -----------
//! - Unlabeled construction fixes the label type to `usize` so positional
//!   results remain ergonomic without turbofish annotations.
//! - Label types only need `Clone` (plus `Debug`/`PartialEq` for result
//!   inspection); ordering of labels is the caller's responsibility and is
//!   assumed to match observation order.
//!
//! Downstream usage
//! ----------------
//! - [`CusumOlsOutcome::cusum_ols`](crate::structural_break::ols::CusumOlsOutcome::cusum_ols)
//!   and
//!   [`CusumRecOutcome::cusum_recursive`](crate::structural_break::recursive::CusumRecOutcome::cusum_recursive)
//!   take `&Series<L>` as the response input and call
//!   [`Series::sample_index`] when assembling results.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction validation (label-length mismatch),
//!   positional vs labeled `sample_index` resolution, and accessors.

use crate::structural_break::errors::{BreakError, BreakResult};
use ndarray::Array1;

/// SampleIndex — a break or exceedance location in the caller's index space.
///
/// Purpose
/// -------
/// Report sample locations either as raw positions (when the caller
/// supplied a plain numeric series) or as caller-provided labels (when the
/// series carried an index), without forcing unlabeled callers to invent
/// synthetic labels.
///
/// Variants
/// --------
/// - `Position(usize)`
///   Zero-based observation position; produced when no labels were
///   supplied.
/// - `Label(L)`
///   The caller's label at the corresponding position; produced when the
///   series was constructed with [`Series::with_labels`].
///
/// Notes
/// -----
/// - Derives `Clone`/`PartialEq`/`Debug` so outcomes containing it remain
///   cheap to clone and easy to assert on in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleIndex<L> {
    Position(usize),
    Label(L),
}

/// Series — an ordered numeric response vector with optional labels.
///
/// Purpose
/// -------
/// Carry the response observations for a structural-break test together
/// with the caller's index labels, if any, so that results can be
/// re-expressed in the original index space.
///
/// Parameters
/// ----------
/// Constructed via [`Series::from_values`] (unlabeled, `L = usize`) or
/// [`Series::with_labels`] (labeled):
/// - `values`: `Array1<f64>`
///   Ordered observations; typically time-indexed.
/// - `labels`: `Vec<L>`
///   One label per observation, in observation order.
///
/// Fields
/// ------
/// - `values`: `Array1<f64>`
///   The observation vector; owned by the series.
/// - `labels`: `Option<Vec<L>>`
///   The optional index; `None` for positional reporting.
///
/// Invariants
/// ----------
/// - When `labels` is `Some`, its length equals `values.len()`.
///
/// Performance
/// -----------
/// - Construction moves the inputs; no copies are made. Accessors borrow.
///
/// Notes
/// -----
/// - Finiteness of `values` is checked by the test entry points via
///   `validation::validate_design`, not here, so a `Series` can also hold
///   derived quantities such as a CUSUM process.
#[derive(Debug, Clone)]
pub struct Series<L> {
    values: Array1<f64>,
    labels: Option<Vec<L>>,
}

impl Series<usize> {
    /// Build an unlabeled series; results will report raw positions.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `Array1<f64>`
    ///   Ordered observations.
    ///
    /// Returns
    /// -------
    /// `Series<usize>`
    ///   A series whose [`SampleIndex`] resolutions are all
    ///   `SampleIndex::Position`.
    pub fn from_values(values: Array1<f64>) -> Self {
        Series { values, labels: None }
    }
}

impl<L: Clone> Series<L> {
    /// Build an unlabeled series with an explicit label type.
    ///
    /// Useful when a single call site handles both labeled and unlabeled
    /// inputs and the label type is therefore already fixed (e.g. the
    /// Python bindings, which always work with `i64` labels).
    pub fn unlabeled(values: Array1<f64>) -> Self {
        Series { values, labels: None }
    }

    /// Build a labeled series carrying the caller's index.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `Array1<f64>`
    ///   Ordered observations.
    /// - `labels`: `Vec<L>`
    ///   One label per observation, in observation order.
    ///
    /// Returns
    /// -------
    /// `BreakResult<Series<L>>`
    ///   - `Ok(series)` when `labels.len() == values.len()`.
    ///   - `Err(BreakError::IndexLengthMismatch)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `BreakError::IndexLengthMismatch(obs, labels)`
    ///   Returned when the label count disagrees with the observation
    ///   count.
    pub fn with_labels(values: Array1<f64>, labels: Vec<L>) -> BreakResult<Self> {
        if labels.len() != values.len() {
            return Err(BreakError::IndexLengthMismatch(values.len(), labels.len()));
        }
        Ok(Series { values, labels: Some(labels) })
    }

    /// The observation vector.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// The optional label sequence.
    pub fn labels(&self) -> Option<&[L]> {
        self.labels.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve a zero-based position into the caller's index space.
    ///
    /// Parameters
    /// ----------
    /// - `pos`: `usize`
    ///   Zero-based observation position; must satisfy `pos < self.len()`
    ///   when labels are present.
    ///
    /// Returns
    /// -------
    /// `SampleIndex<L>`
    ///   `Label(labels[pos])` for labeled series, `Position(pos)`
    ///   otherwise.
    ///
    /// Panics
    /// ------
    /// - Panics if `pos >= self.len()` on a labeled series. Callers index
    ///   only with positions derived from the series itself.
    pub fn sample_index(&self, pos: usize) -> SampleIndex<L> {
        match &self.labels {
            Some(labels) => SampleIndex::Label(labels[pos].clone()),
            None => SampleIndex::Position(pos),
        }
    }

    /// Re-wrap a derived value vector with this series' labels.
    ///
    /// Used by the result assemblers to return the CUSUM process in the
    /// caller's index space. The derived vector must be position-aligned
    /// with the original observations.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `Array1<f64>`
    ///   Derived values, one per original observation.
    ///
    /// Returns
    /// -------
    /// `Series<L>`
    ///   The derived values carrying a clone of this series' labels (or
    ///   no labels when the original had none).
    ///
    /// Panics
    /// ------
    /// - Never panics; when the lengths disagree on a labeled series this
    ///   would violate the construction invariant, so the labels are
    ///   dropped rather than misaligned. Result assemblers always pass
    ///   position-aligned vectors.
    pub fn relabel(&self, values: Array1<f64>) -> Series<L> {
        let labels = match &self.labels {
            Some(labels) if labels.len() == values.len() => Some(labels.clone()),
            _ => None,
        };
        Series { values, labels }
    }
}
