//! Simulation observer trait for progress reporting and data collection.

use epi_core::Step;
use epi_series::TimeSeries;

use crate::StepReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, report: &StepReport) {
///         println!("{}: {} infected, {} live", report.step, report.counts.infected, report.live);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the step's propagation.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called once the step's propagation and churn are done.
    fn on_step_end(&mut self, _report: &StepReport) {}

    /// Called on the single step where the intervention fires, before its
    /// releases are applied.
    fn on_intervention(&mut self, _step: Step, _infected: usize) {}

    /// Called once with the reconciled series after the final step.
    fn on_sim_end(&mut self, _series: &TimeSeries) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
