//! `epi-sim` — step loop orchestrator for the facility epidemic workspace.
//!
//! # Step loop
//!
//! ```text
//! for i in 0..config.max_time:
//!   ① Propagate  — PropagationStep::advance over [i, i + 1); keep the trace,
//!                  adopt its final membership.
//!   ② Intervene  — InterventionPolicy::evaluate(live infected) → releases.
//!   ③ Churn      — ChurnEngine::apply(births, releases) → deltas[i + 1].
//!                  Skipped after the final step.
//! then:
//!   ④ Aggregate  — stitch traces into one timeline.
//!   ⑤ Reconcile  — carve deaths out of R using death_rate and the deltas.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use epi_core::RunConfig;
//! use epi_sim::simulate;
//!
//! let series = simulate(&RunConfig::default())?;
//! println!("{} deaths", series.d.last().unwrap_or(&0));
//! ```

pub mod builder;
pub mod error;
pub mod intervention;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use intervention::{InterventionDecision, InterventionPolicy, PolicyState};
pub use observer::{NoopObserver, SimObserver};
pub use report::StepReport;
pub use sim::Sim;

use epi_core::RunConfig;
use epi_propagation::EventDrivenSir;
use epi_series::TimeSeries;

/// Run a full simulation with the default event-driven engine and return the
/// reconciled `(t, S, I, R, D)` series.
pub fn simulate(config: &RunConfig) -> SimResult<TimeSeries> {
    simulate_with(config, &mut NoopObserver)
}

/// [`simulate`] with observer callbacks.
pub fn simulate_with<O: SimObserver>(config: &RunConfig, observer: &mut O) -> SimResult<TimeSeries> {
    SimBuilder::new(config.clone(), EventDrivenSir).build()?.run(observer)
}
