//! A propagation engine in which nothing happens.

use epi_core::SimRng;
use epi_population::CompartmentCounts;

use crate::{PropagationResult, PropagationStep, PropagationTrace, StepRequest};

/// A [`PropagationStep`] that produces no events.
///
/// The trace holds only the opening and closing observations, and membership
/// passes through unchanged.  Useful for exercising churn and reconciliation
/// without stochastic disease dynamics.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrozenPropagation;

impl PropagationStep for FrozenPropagation {
    fn advance(&self, request: &StepRequest<'_>, _rng: &mut SimRng) -> PropagationResult<PropagationTrace> {
        request.validate()?;
        let counts = CompartmentCounts {
            susceptible: request.susceptible_count(),
            infected:    request.infected.len(),
            recovered:   request.recovered.len(),
        };
        Ok(PropagationTrace::new(request.window, counts)
            .close(request.infected.to_vec(), request.recovered.to_vec()))
    }

    fn name(&self) -> &'static str {
        "frozen"
    }
}
