//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use epi_series::TimeSeries;
use epi_sim::{SimObserver, StepReport};

use crate::row::{SeriesRow, StepRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes one row per step as the run progresses and
/// the reconciled time series once it ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, report: &StepReport) {
        let result = self.writer.write_step(&StepRow::from(report));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, series: &TimeSeries) {
        let rows: Vec<SeriesRow> = series.points().map(SeriesRow::from).collect();
        let result = self.writer.write_series(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
