//! Compartment membership lists.
//!
//! # Design
//!
//! Only the infected and recovered sets are stored.  Susceptible is derived
//! on demand as "every live individual in neither list", so admitting a
//! susceptible individual needs no bookkeeping at all and the three sets can
//! never drift out of partition through a forgotten update.
//!
//! `CompartmentLists` is a plain value.  The churn engine consumes one and
//! returns the updated one; nothing holds a reference to the lists across a
//! step.

use rustc_hash::FxHashSet;

use epi_core::{Compartment, EpiError, EpiResult, IndividualId, SimRng};

use crate::PopulationStore;

// ── CompartmentCounts ─────────────────────────────────────────────────────────

/// Head-count per compartment.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompartmentCounts {
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,
}

impl CompartmentCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }

    #[inline]
    pub fn get(&self, compartment: Compartment) -> usize {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Infected    => self.infected,
            Compartment::Recovered   => self.recovered,
        }
    }

    /// Add one to `compartment`.
    #[inline]
    pub fn bump(&mut self, compartment: Compartment) {
        match compartment {
            Compartment::Susceptible => self.susceptible += 1,
            Compartment::Infected    => self.infected += 1,
            Compartment::Recovered   => self.recovered += 1,
        }
    }
}

// ── CompartmentLists ──────────────────────────────────────────────────────────

/// Infected and recovered membership; susceptible is implicit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompartmentLists {
    pub infected:  Vec<IndividualId>,
    pub recovered: Vec<IndividualId>,
}

impl CompartmentLists {
    pub fn new(infected: Vec<IndividualId>, recovered: Vec<IndividualId>) -> Self {
        Self { infected, recovered }
    }

    /// Pick `infected + recovered` distinct live individuals uniformly at
    /// random and split them into the two lists.
    ///
    /// Asks for more individuals than are live yield as many as exist,
    /// infected first.
    pub fn seed<G: PopulationStore>(
        graph:     &G,
        infected:  usize,
        recovered: usize,
        rng:       &mut SimRng,
    ) -> Self {
        let nodes: Vec<IndividualId> = graph.nodes().collect();
        let mut picked = rng.sample(&nodes, infected + recovered);
        let recovered_part = picked.split_off(infected.min(picked.len()));
        Self { infected: picked, recovered: recovered_part }
    }

    /// Every live individual in neither list, in the graph's node order.
    pub fn susceptible<G: PopulationStore>(&self, graph: &G) -> Vec<IndividualId> {
        let labelled = self.labelled();
        graph.nodes().filter(|id| !labelled.contains(id)).collect()
    }

    /// Head-count per compartment against the live population.
    ///
    /// Assumes the partition invariant holds (see [`check_partition`]).
    ///
    /// [`check_partition`]: Self::check_partition
    pub fn counts<G: PopulationStore>(&self, graph: &G) -> CompartmentCounts {
        let labelled = self.infected.len() + self.recovered.len();
        CompartmentCounts {
            susceptible: graph.node_count().saturating_sub(labelled),
            infected:    self.infected.len(),
            recovered:   self.recovered.len(),
        }
    }

    /// Which compartment `id` is in, assuming it is live.
    pub fn compartment_of(&self, id: IndividualId) -> Compartment {
        if self.infected.contains(&id) {
            Compartment::Infected
        } else if self.recovered.contains(&id) {
            Compartment::Recovered
        } else {
            Compartment::Susceptible
        }
    }

    /// Verify that infected and recovered are disjoint, duplicate-free, and
    /// contain only live individuals.  Susceptible then completes the
    /// partition by construction.
    pub fn check_partition<G: PopulationStore>(&self, graph: &G) -> EpiResult<()> {
        let mut seen = FxHashSet::default();
        for &id in self.infected.iter().chain(&self.recovered) {
            if !graph.contains(id) {
                return Err(EpiError::UnknownIndividual(id));
            }
            if !seen.insert(id) {
                return Err(EpiError::DuplicateMembership(id));
            }
        }
        Ok(())
    }

    /// Drop every id in `removed` from both lists, preserving order.
    pub(crate) fn without(mut self, removed: &FxHashSet<IndividualId>) -> Self {
        self.infected.retain(|id| !removed.contains(id));
        self.recovered.retain(|id| !removed.contains(id));
        self
    }

    fn labelled(&self) -> FxHashSet<IndividualId> {
        self.infected.iter().chain(&self.recovered).copied().collect()
    }
}
