//! Per-step record handed to observers.

use epi_core::Step;
use epi_population::CompartmentCounts;

use crate::PolicyState;

/// What happened during one step.
///
/// Compartment counts are taken after propagation and before churn, the same
/// state the step's closing observation records.
#[derive(Clone, PartialEq, Debug)]
pub struct StepReport {
    pub step: Step,
    /// End of the step's window, where churn is applied.
    pub time: f64,

    pub counts: CompartmentCounts,
    /// Live individuals after propagation.
    pub live: usize,
    /// Disease events inside the window.
    pub events: usize,

    /// Releases the policy asked for.
    pub release_volume: usize,
    pub released:       CompartmentCounts,
    pub admitted:       CompartmentCounts,
    pub delta_recovered: i64,
    /// Live individuals after churn.
    pub live_after_churn: usize,

    pub policy: PolicyState,
    /// Transmission rate used for this step's propagation.
    pub transmission_rate: f64,
}
