//! The churn engine: releases and admissions between propagation steps.
//!
//! # Step contract
//!
//! ```text
//! release(k):
//!   S      = live − I − R
//!   R'     = floor(|R| × (1 − death_rate))     presumed-alive recovered
//!   denom  = |S| + |I| + R'                    k > denom → PopulationExhausted
//!   shares = (|S|, |I|, R') / denom            fixed for the whole step
//!   k times: draw a compartment by `shares`, take one member uniformly
//!   remove every drawn individual from the graph and both lists
//!
//! admit(b):
//!   b times: id = max_live_id + 1, compartment ~ admission mix,
//!            contact with every other live individual w.p. p
//! ```
//!
//! Shares are not renormalised between draws of the same step.  Over many
//! draws this drifts slightly from exact proportional sampling; it is kept
//! because it is the established behaviour of the model and changing it
//! changes output distributions.  A draw that lands on an exhausted
//! compartment is redirected to the non-empty ones, weighted by the same
//! fixed shares.

use rustc_hash::FxHashSet;
use tracing::debug;

use epi_core::{AdmissionMix, Compartment, IndividualId, RunConfig, SimRng};

use crate::{ChurnError, ChurnResult, CompartmentCounts, CompartmentLists, PopulationStore};

// ── Inputs and outcomes ───────────────────────────────────────────────────────

/// How many individuals to move this step.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ChurnOrder {
    pub births:   usize,
    pub releases: usize,
}

/// Result of [`ChurnEngine::release`].
#[derive(Clone, Debug)]
pub struct ReleaseOutcome {
    pub lists:    CompartmentLists,
    /// Released ids, in draw order.
    pub released: Vec<IndividualId>,
    pub counts:   CompartmentCounts,
}

/// Result of [`ChurnEngine::admit`].
#[derive(Clone, Debug)]
pub struct AdmissionOutcome {
    pub lists:    CompartmentLists,
    /// Newly allocated ids, ascending.
    pub admitted: Vec<IndividualId>,
    pub counts:   CompartmentCounts,
}

/// Result of one full churn step.
#[derive(Clone, Debug)]
pub struct ChurnOutcome {
    pub lists:    CompartmentLists,
    pub released: CompartmentCounts,
    pub admitted: CompartmentCounts,
    /// Recovered admitted minus recovered released.
    pub delta_recovered: i64,
}

// ── ChurnEngine ───────────────────────────────────────────────────────────────

/// Mutates the population between propagation steps.
///
/// Holds only immutable parameters; all state is passed in and handed back.
#[derive(Clone, Debug)]
pub struct ChurnEngine {
    edge_probability: f64,
    admission:        AdmissionMix,
    death_rate:       f64,
}

impl ChurnEngine {
    pub fn new(edge_probability: f64, admission: AdmissionMix, death_rate: f64) -> Self {
        Self { edge_probability, admission, death_rate }
    }

    /// Engine parameters taken from a validated run configuration.
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.edge_probability, config.churn.admission, config.death_rate)
    }

    /// Recovered individuals presumed still alive, `floor(|R| × (1 − death_rate))`.
    #[inline]
    pub fn alive_recovered(&self, recovered: usize) -> usize {
        (recovered as f64 * (1.0 - self.death_rate)).floor() as usize
    }

    /// Size of the pool releases are drawn from.
    pub fn releasable<G: PopulationStore>(&self, graph: &G, lists: &CompartmentLists) -> usize {
        let counts = lists.counts(graph);
        counts.susceptible + counts.infected + self.alive_recovered(counts.recovered)
    }

    /// Release then admit, reporting the net recovered change caused by churn.
    pub fn apply<G: PopulationStore>(
        &self,
        graph: &mut G,
        lists: CompartmentLists,
        order: ChurnOrder,
        rng:   &mut SimRng,
    ) -> ChurnResult<ChurnOutcome> {
        check_id_headroom(graph, order.births)?;
        let released = self.release(graph, lists, order.releases, rng)?;
        let admitted = self.admit(graph, released.lists, order.births, rng)?;

        let delta_recovered = admitted.counts.recovered as i64 - released.counts.recovered as i64;
        debug!(
            released = released.counts.total(),
            released_recovered = released.counts.recovered,
            admitted = admitted.counts.total(),
            admitted_recovered = admitted.counts.recovered,
            delta_recovered,
            live = graph.node_count(),
            "churn applied"
        );

        Ok(ChurnOutcome {
            lists:    admitted.lists,
            released: released.counts,
            admitted: admitted.counts,
            delta_recovered,
        })
    }

    /// Remove `count` individuals by stratified sampling across compartments.
    ///
    /// Fails before touching the graph if `count` exceeds the releasable pool.
    pub fn release<G: PopulationStore>(
        &self,
        graph: &mut G,
        lists: CompartmentLists,
        count: usize,
        rng:   &mut SimRng,
    ) -> ChurnResult<ReleaseOutcome> {
        if count == 0 {
            return Ok(ReleaseOutcome {
                lists,
                released: Vec::new(),
                counts:   CompartmentCounts::default(),
            });
        }

        let mut pools = [
            Pool::new(lists.susceptible(graph), None),
            Pool::new(lists.infected.clone(), None),
            Pool::new(lists.recovered.clone(), Some(self.alive_recovered(lists.recovered.len()))),
        ];
        let mut denom: usize = pools.iter().map(Pool::remaining).sum();
        if count > denom {
            return Err(ChurnError::PopulationExhausted { requested: count, releasable: denom });
        }

        let ps = pools[0].remaining() as f64 / denom as f64;
        let pi = pools[1].remaining() as f64 / denom as f64;
        let shares = [ps, pi, 1.0 - ps - pi];

        let mut released = Vec::with_capacity(count);
        let mut counts = CompartmentCounts::default();
        for _ in 0..count {
            let mut compartment = draw_compartment(rng.unit(), &shares);
            if pools[compartment.index()].remaining() == 0 {
                compartment = redirect(rng.unit(), &shares, &pools);
            }
            // `denom` still covers this draw, so some pool is non-empty.
            let Some(id) = pools[compartment.index()].take(rng) else {
                break;
            };
            released.push(id);
            counts.bump(compartment);
            denom -= 1;
        }

        let removed: FxHashSet<IndividualId> = released.iter().copied().collect();
        for &id in &released {
            graph.remove_node(id);
        }
        let lists = lists.without(&removed);

        debug!(
            requested = count,
            susceptible = counts.susceptible,
            infected = counts.infected,
            recovered = counts.recovered,
            remaining_releasable = denom,
            "released individuals"
        );

        Ok(ReleaseOutcome { lists, released, counts })
    }

    /// Admit `count` new individuals.
    ///
    /// Each gets an id above every live id, a compartment drawn from the
    /// admission mix, and a G(n,p) contact to every other live individual.
    /// Fails before touching the graph if the ids would run past `u32::MAX`;
    /// `count == 0` is a no-op.
    pub fn admit<G: PopulationStore>(
        &self,
        graph:     &mut G,
        mut lists: CompartmentLists,
        count:     usize,
        rng:       &mut SimRng,
    ) -> ChurnResult<AdmissionOutcome> {
        check_id_headroom(graph, count)?;
        let mut admitted = Vec::with_capacity(count);
        let mut counts = CompartmentCounts::default();

        for _ in 0..count {
            let Some(id) = graph.next_free_id() else {
                return Err(exhausted(graph, count));
            };
            graph.add_node(id);

            let compartment = self.admission_compartment(rng.unit());
            match compartment {
                Compartment::Susceptible => {}
                Compartment::Infected    => lists.infected.push(id),
                Compartment::Recovered   => lists.recovered.push(id),
            }
            counts.bump(compartment);

            let others: Vec<IndividualId> = graph.nodes().filter(|&other| other != id).collect();
            for other in others {
                if rng.gen_bool(self.edge_probability) {
                    graph.add_edge(id, other);
                }
            }
            admitted.push(id);
        }

        Ok(AdmissionOutcome { lists, admitted, counts })
    }

    fn admission_compartment(&self, u: f64) -> Compartment {
        if u < self.admission.infected {
            Compartment::Infected
        } else if u < self.admission.infected + self.admission.recovered {
            Compartment::Recovered
        } else {
            Compartment::Susceptible
        }
    }
}

// ── Id headroom ───────────────────────────────────────────────────────────────

/// Ok if `count` admissions fit above the current largest live id.
fn check_id_headroom<G: PopulationStore>(graph: &G, count: usize) -> ChurnResult<()> {
    if count == 0 {
        return Ok(());
    }
    let first = graph.next_free_id().map_or(u64::from(u32::MAX) + 1, |id| u64::from(id.0));
    if first + count as u64 - 1 > u64::from(u32::MAX) {
        return Err(exhausted(graph, count));
    }
    Ok(())
}

fn exhausted<G: PopulationStore>(graph: &G, requested: usize) -> ChurnError {
    ChurnError::IdsExhausted {
        requested,
        max_live: graph.max_live_id().unwrap_or(IndividualId(u32::MAX)),
    }
}

// ── Sampling helpers ──────────────────────────────────────────────────────────

/// Working pool of one compartment.  `cap` limits how many members may be
/// drawn (the presumed-alive share of recovered).
struct Pool {
    members: Vec<IndividualId>,
    cap:     usize,
}

impl Pool {
    fn new(members: Vec<IndividualId>, cap: Option<usize>) -> Self {
        let cap = cap.unwrap_or(members.len()).min(members.len());
        Self { members, cap }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.cap
    }

    fn take(&mut self, rng: &mut SimRng) -> Option<IndividualId> {
        if self.cap == 0 {
            return None;
        }
        self.cap -= 1;
        rng.take_uniform(&mut self.members)
    }
}

fn draw_compartment(u: f64, shares: &[f64; 3]) -> Compartment {
    if u < shares[0] {
        Compartment::Susceptible
    } else if u < shares[0] + shares[1] {
        Compartment::Infected
    } else {
        Compartment::Recovered
    }
}

/// Choose among the non-empty pools, weighted by their fixed shares.
fn redirect(u: f64, shares: &[f64; 3], pools: &[Pool; 3]) -> Compartment {
    let open: Vec<Compartment> = Compartment::ALL
        .into_iter()
        .filter(|c| pools[c.index()].remaining() > 0)
        .collect();
    let total: f64 = open.iter().map(|c| shares[c.index()]).sum();
    let mut target = u * total;
    for &c in &open {
        target -= shares[c.index()];
        if target < 0.0 {
            return c;
        }
    }
    // Float round-off on the last bucket.
    open.last().copied().unwrap_or(Compartment::Susceptible)
}
