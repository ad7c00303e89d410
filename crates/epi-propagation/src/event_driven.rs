//! Continuous-time Markovian SIR on the contact graph.
//!
//! # Algorithm
//!
//! Event-driven, in the style of the "fast SIR" Gillespie variant: instead
//! of sampling every edge every instant, each infection schedules
//!
//! ```text
//! recovery(u)      at t + Exp(γ)
//! transmit(u → v)  at t + Exp(τ)   for every susceptible neighbour v,
//!                                  kept only if earlier than u's recovery
//!                                  and earlier than any transmission to v
//!                                  already scheduled
//! ```
//!
//! A min-heap pops events in time order until the next one falls at or
//! after `window.end`.  A transmission to an individual who is no longer
//! susceptible is stale and discarded.  Ties on time are broken by id, so
//! the run order is a pure function of the RNG stream.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use epi_core::{Compartment, IndividualId, SimRng};
use epi_population::{CompartmentCounts, PopulationStore};

use crate::{PropagationResult, PropagationStep, PropagationTrace, StepRequest};

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum EventKind {
    Recover,
    Transmit,
}

#[derive(Copy, Clone, Debug)]
struct Event {
    time:   f64,
    kind:   EventKind,
    target: IndividualId,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    /// Reversed so that `BinaryHeap` pops the earliest event first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.kind.cmp(&self.kind))
            .then_with(|| other.target.cmp(&self.target))
    }
}

// ── EventDrivenSir ────────────────────────────────────────────────────────────

/// The default propagation engine.
#[derive(Copy, Clone, Debug, Default)]
pub struct EventDrivenSir;

impl PropagationStep for EventDrivenSir {
    fn advance(&self, request: &StepRequest<'_>, rng: &mut SimRng) -> PropagationResult<PropagationTrace> {
        request.validate()?;
        let mut run = Run::new(request);
        run.seed(rng);
        run.drain(rng);
        Ok(run.finish())
    }

    fn name(&self) -> &'static str {
        "event-driven-sir"
    }
}

/// Mutable state of one `advance` call.
struct Run<'r, 'a> {
    request:    &'r StepRequest<'a>,
    /// Absent means susceptible.
    status:     FxHashMap<IndividualId, Compartment>,
    pred_inf:   FxHashMap<IndividualId, f64>,
    queue:      BinaryHeap<Event>,
    counts:     CompartmentCounts,
    trace:      PropagationTrace,
    infections: usize,
    recoveries: usize,
}

impl<'r, 'a> Run<'r, 'a> {
    fn new(request: &'r StepRequest<'a>) -> Self {
        let mut status = FxHashMap::default();
        for &id in request.infected {
            status.insert(id, Compartment::Infected);
        }
        for &id in request.recovered {
            status.insert(id, Compartment::Recovered);
        }
        let counts = CompartmentCounts {
            susceptible: request.susceptible_count(),
            infected:    request.infected.len(),
            recovered:   request.recovered.len(),
        };
        Self {
            request,
            status,
            pred_inf: FxHashMap::default(),
            queue: BinaryHeap::new(),
            counts,
            trace: PropagationTrace::new(request.window, counts),
            infections: 0,
            recoveries: 0,
        }
    }

    #[inline]
    fn is_susceptible(&self, id: IndividualId) -> bool {
        !self.status.contains_key(&id)
    }

    /// Schedule recovery and onward transmission for every fed-in infected.
    fn seed(&mut self, rng: &mut SimRng) {
        let start = self.request.window.start;
        let infected = self.request.infected;
        for &u in infected {
            self.schedule_from(u, start, rng);
        }
    }

    /// `u` became infected at `t`: schedule its recovery and its
    /// transmissions to susceptible neighbours.
    fn schedule_from(&mut self, u: IndividualId, t: f64, rng: &mut SimRng) {
        let end = self.request.window.end;
        let recovery = t + rng.exponential(self.request.recovery_rate);
        if recovery < end {
            self.queue.push(Event { time: recovery, kind: EventKind::Recover, target: u });
        }

        let graph = self.request.graph;
        for v in graph.neighbors(u) {
            if !self.is_susceptible(v) {
                continue;
            }
            let infection = t + rng.exponential(self.request.transmission_rate);
            let previous = self.pred_inf.get(&v).copied().unwrap_or(f64::INFINITY);
            if infection < recovery && infection < previous && infection < end {
                self.pred_inf.insert(v, infection);
                self.queue.push(Event { time: infection, kind: EventKind::Transmit, target: v });
            }
        }
    }

    fn drain(&mut self, rng: &mut SimRng) {
        let end = self.request.window.end;
        while let Some(event) = self.queue.pop() {
            if event.time >= end {
                break;
            }
            match event.kind {
                EventKind::Transmit => {
                    if !self.is_susceptible(event.target) {
                        continue;
                    }
                    self.status.insert(event.target, Compartment::Infected);
                    self.counts.susceptible -= 1;
                    self.counts.infected += 1;
                    self.infections += 1;
                    self.trace.record(event.time, self.counts);
                    self.schedule_from(event.target, event.time, rng);
                }
                EventKind::Recover => {
                    self.status.insert(event.target, Compartment::Recovered);
                    self.counts.infected -= 1;
                    self.counts.recovered += 1;
                    self.recoveries += 1;
                    self.trace.record(event.time, self.counts);
                }
            }
        }
    }

    fn finish(self) -> PropagationTrace {
        let mut infected = Vec::with_capacity(self.counts.infected);
        let mut recovered = Vec::with_capacity(self.counts.recovered);
        for id in self.request.graph.nodes() {
            match self.status.get(&id) {
                Some(Compartment::Infected)  => infected.push(id),
                Some(Compartment::Recovered) => recovered.push(id),
                Some(Compartment::Susceptible) | None => {}
            }
        }

        debug!(
            window = %self.request.window,
            infections = self.infections,
            recoveries = self.recoveries,
            infected = infected.len(),
            recovered = recovered.len(),
            "propagation step finished"
        );

        self.trace.close(infected, recovered)
    }
}
