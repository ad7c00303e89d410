//! The `Sim` struct and its step loop.

use tracing::{debug, info, warn};

use epi_core::{RunConfig, SimRng, Step};
use epi_population::{
    ChurnEngine, ChurnOrder, CompartmentCounts, CompartmentLists, ContactGraph, PopulationStore,
};
use epi_propagation::{PropagationStep, PropagationTrace, StepRequest};
use epi_series::{RunSummary, TimeSeries, reconcile};

use crate::{InterventionPolicy, SimObserver, SimResult, StepReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` holds all run state and drives the step loop:
///
/// 1. **Propagation**: `P::advance` evolves the disease over `[i, i + 1)`;
///    the trace's final membership becomes the current lists.
/// 2. **Intervention**: the policy turns the live infected count into this
///    step's release volume, firing at most once per run.
/// 3. **Churn**: the churn engine releases and admits, and the net recovered
///    change is recorded as `deltas[i + 1]`.
///
/// Churn runs between two propagation steps, so the final step has none.
/// Each churn restates the closing observation of the step before it, so
/// the stitched series shows the post-churn state at every boundary.
/// After the final step, [`finish`][Self::finish] stitches the traces and
/// reconciles deaths.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PropagationStep> {
    /// Immutable run parameters.
    pub config: RunConfig,

    /// Live population and its contacts.  Mutated only by `churn`.
    pub graph: ContactGraph,

    /// Current infected and recovered membership.
    pub lists: CompartmentLists,

    pub propagator: P,
    pub churn:      ChurnEngine,
    pub policy:     InterventionPolicy,

    pub(crate) rng:  SimRng,
    pub(crate) step: Step,

    /// One trace per completed step.
    pub(crate) traces: Vec<PropagationTrace>,

    /// `deltas[i]` is the churn delta applied at time `i`; `deltas[0] == 0`.
    pub(crate) deltas: Vec<i64>,

    pub(crate) reports: Vec<StepReport>,

    extinction_logged: bool,
}

impl<P: PropagationStep> Sim<P> {
    pub(crate) fn new(
        config:     RunConfig,
        graph:      ContactGraph,
        lists:      CompartmentLists,
        propagator: P,
        rng:        SimRng,
    ) -> Self {
        let churn = ChurnEngine::from_config(&config);
        let policy = InterventionPolicy::from_config(&config);
        let capacity = config.max_time as usize;
        Self {
            config,
            graph,
            lists,
            propagator,
            churn,
            policy,
            rng,
            step: Step::ZERO,
            traces: Vec::with_capacity(capacity),
            deltas: vec![0],
            reports: Vec::with_capacity(capacity),
            extinction_logged: false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run every remaining step, then aggregate and reconcile.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TimeSeries> {
        info!(
            population = self.graph.node_count(),
            edges = self.graph.edge_count(),
            infected = self.lists.infected.len(),
            recovered = self.lists.recovered.len(),
            max_time = self.config.max_time,
            propagator = self.propagator.name(),
            "simulation started"
        );

        while !self.is_finished() {
            self.process_step(observer)?;
        }

        let series = self.finish()?;
        let summary = RunSummary::from_series(&series);
        info!(
            observations = summary.observations,
            total_infections = summary.total_infections,
            total_deaths = summary.total_deaths,
            peak_infected = summary.peak_infected,
            policy = %self.policy.state(),
            "simulation finished"
        );
        observer.on_sim_end(&series);
        Ok(series)
    }

    /// Run up to `n` steps from the current position, stopping early at
    /// `max_time`.  Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.is_finished() {
                break;
            }
            self.process_step(observer)?;
        }
        Ok(())
    }

    /// Stitch the traces recorded so far and reconcile deaths.
    ///
    /// Does not consume the simulation; calling it mid-run gives the series
    /// up to the last completed step.
    pub fn finish(&self) -> SimResult<TimeSeries> {
        let deltas = &self.deltas[..self.traces.len().min(self.deltas.len())];
        Ok(reconcile(&self.traces, deltas, self.config.death_rate)?)
    }

    /// Index of the next step to run.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.step
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.step.0 >= self.config.max_time
    }

    pub fn traces(&self) -> &[PropagationTrace] {
        &self.traces
    }

    pub fn deltas(&self) -> &[i64] {
        &self.deltas
    }

    pub fn reports(&self) -> &[StepReport] {
        &self.reports
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let step = self.step;
        observer.on_step_start(step);

        // ── Propagation ───────────────────────────────────────────────────
        let transmission_rate = self.policy.transmission_rate();
        let request = StepRequest::new(
            &self.graph,
            transmission_rate,
            self.config.recovery_rate,
            &self.lists.infected,
            &self.lists.recovered,
            step.window(),
        );
        let trace = self.propagator.advance(&request, &mut self.rng)?;
        self.lists = trace.final_lists();
        let counts = self.lists.counts(&self.graph);
        let live = self.graph.node_count();
        let events = trace.event_count();
        self.traces.push(trace);

        // ── Intervention and churn, between this step and the next ────────
        let last_step = step.0 + 1 >= self.config.max_time;
        let mut report = StepReport {
            step,
            time: step.window().end,
            counts,
            live,
            events,
            release_volume:   0,
            released:         CompartmentCounts::default(),
            admitted:         CompartmentCounts::default(),
            delta_recovered:  0,
            live_after_churn: live,
            policy:           self.policy.state(),
            transmission_rate,
        };

        if !last_step {
            self.churn_after(step, counts, &mut report, observer)?;
        }

        debug!(
            %step,
            events,
            susceptible = counts.susceptible,
            infected = counts.infected,
            recovered = counts.recovered,
            release_volume = report.release_volume,
            delta_recovered = report.delta_recovered,
            live = report.live_after_churn,
            "step complete"
        );

        observer.on_step_end(&report);
        self.reports.push(report);
        self.step = step.next();
        Ok(())
    }

    fn churn_after<O: SimObserver>(
        &mut self,
        step:     Step,
        counts:   CompartmentCounts,
        report:   &mut StepReport,
        observer: &mut O,
    ) -> SimResult<()> {
        let decision = self.policy.evaluate(step, counts.infected);
        if decision.fired {
            observer.on_intervention(step, counts.infected);
        }
        if counts.infected == 0 && !self.extinction_logged {
            self.extinction_logged = true;
            warn!(%step, releases = decision.releases, "no infected individuals remain; churn continues");
        }

        let order = ChurnOrder {
            births:   self.config.churn.births_per_step,
            releases: decision.releases,
        };
        let outcome = self.churn.apply(&mut self.graph, self.lists.clone(), order, &mut self.rng)?;
        self.lists = outcome.lists;
        self.deltas.push(outcome.delta_recovered);

        // The boundary instant carries the post-churn state, which is where
        // the death correction for this churn applies.
        let after = self.lists.counts(&self.graph);
        if let Some(trace) = self.traces.last_mut() {
            trace.restate_close(after);
        }

        report.release_volume = decision.releases;
        report.released = outcome.released;
        report.admitted = outcome.admitted;
        report.delta_recovered = outcome.delta_recovered;
        report.live_after_churn = self.graph.node_count();
        report.policy = self.policy.state();
        Ok(())
    }
}
