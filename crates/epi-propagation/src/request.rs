//! Inputs of one propagation step.

use rustc_hash::FxHashSet;

use epi_core::{IndividualId, StepWindow};
use epi_population::{ContactGraph, PopulationStore};

use crate::{PropagationError, PropagationResult};

/// Everything a [`PropagationStep`][crate::PropagationStep] needs to evolve
/// the population over one window.
///
/// Built fresh by the simulation driver before every step and borrowed by the
/// engine for the duration of the call.  Nothing here is mutated: the engine
/// reports the new membership in its trace and the driver adopts it.
#[derive(Copy, Clone, Debug)]
pub struct StepRequest<'a> {
    pub graph: &'a ContactGraph,

    /// Per susceptible–infected edge transmission rate (τ).
    pub transmission_rate: f64,

    /// Per infected individual recovery rate (γ).
    pub recovery_rate: f64,

    pub infected:  &'a [IndividualId],
    pub recovered: &'a [IndividualId],

    pub window: StepWindow,
}

impl<'a> StepRequest<'a> {
    #[inline]
    pub fn new(
        graph:             &'a ContactGraph,
        transmission_rate: f64,
        recovery_rate:     f64,
        infected:          &'a [IndividualId],
        recovered:         &'a [IndividualId],
        window:            StepWindow,
    ) -> Self {
        Self { graph, transmission_rate, recovery_rate, infected, recovered, window }
    }

    /// Reject malformed requests before any event is generated.
    pub fn validate(&self) -> PropagationResult<()> {
        if !self.window.is_valid() {
            return Err(PropagationError::InvalidWindow(self.window));
        }
        for (name, value) in [
            ("transmission_rate", self.transmission_rate),
            ("recovery_rate", self.recovery_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PropagationError::InvalidRate { name, value });
            }
        }

        let mut seen = FxHashSet::default();
        for &id in self.infected.iter().chain(self.recovered) {
            if !self.graph.contains(id) {
                return Err(PropagationError::UnknownIndividual(id));
            }
            if !seen.insert(id) {
                return Err(PropagationError::OverlappingMembership(id));
            }
        }
        Ok(())
    }

    /// Number of live individuals in neither list.
    #[inline]
    pub fn susceptible_count(&self) -> usize {
        self.graph
            .node_count()
            .saturating_sub(self.infected.len() + self.recovered.len())
    }
}
