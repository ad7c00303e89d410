//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, SeriesRow, StepRow};

/// Trait implemented by output backends.
///
/// The observer never propagates a writer error; it keeps the first one for
/// retrieval with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write the reconciled series, one row per observation instant.
    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()>;

    /// Write one per-step report row.
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Later calls are no-ops.
    fn finish(&mut self) -> OutputResult<()>;
}
