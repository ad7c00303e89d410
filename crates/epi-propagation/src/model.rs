//! The `PropagationStep` trait — the seam between the churn/reconciliation
//! core and whatever evolves the disease inside a window.

use epi_core::SimRng;

use crate::{PropagationResult, PropagationTrace, StepRequest};

/// Evolves compartment membership over one window of the contact graph.
///
/// Implementations see the population read-only through a [`StepRequest`]
/// and draw every random number from the run's [`SimRng`], so a seeded run
/// replays exactly.
///
/// # Contract
///
/// The returned trace begins with an observation at `window.start` equal to
/// the fed-in counts and ends with a closing observation at `window.end`.
/// Its final membership partitions the same live population it was given.
///
/// # Example
///
/// ```rust,ignore
/// struct EveryoneRecovers;
///
/// impl PropagationStep for EveryoneRecovers {
///     fn advance(&self, req: &StepRequest<'_>, _rng: &mut SimRng) -> PropagationResult<PropagationTrace> {
///         req.validate()?;
///         let recovered: Vec<_> = req.infected.iter().chain(req.recovered).copied().collect();
///         let start = CompartmentCounts {
///             susceptible: req.susceptible_count(),
///             infected:    req.infected.len(),
///             recovered:   req.recovered.len(),
///         };
///         Ok(PropagationTrace::new(req.window, start).close(vec![], recovered))
///     }
/// }
/// ```
pub trait PropagationStep {
    fn advance(&self, request: &StepRequest<'_>, rng: &mut SimRng) -> PropagationResult<PropagationTrace>;

    /// Short label used in log events.
    fn name(&self) -> &'static str {
        "propagation"
    }
}
