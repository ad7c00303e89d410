//! The per-step record produced by a propagation engine.

use epi_core::{IndividualId, StepWindow};
use epi_population::{CompartmentCounts, CompartmentLists};

use crate::{PropagationError, PropagationResult};

/// Compartment counts over one window, plus the membership it ends with.
///
/// # Shape
///
/// ```text
/// times:  window.start  e₁  e₂ … eₙ  window.end
/// S/I/R:  fed-in        after each    same as eₙ
///         state         event
/// ```
///
/// The first observation is always the state handed to the engine, and the
/// last is a closing observation at `window.end` repeating the final state.
/// When churn runs at `window.end`, the driver restates the closing
/// observation with the post-churn counts through [`restate_close`], so it
/// equals the next step's first observation.  That next-step sample is the
/// duplicate the timeline aggregator drops.
///
/// Engines record into it through [`record`] and seal it with [`close`].
/// The final membership is never restated.
///
/// [`record`]: Self::record
/// [`close`]: Self::close
/// [`restate_close`]: Self::restate_close
#[derive(Clone, Debug, PartialEq)]
pub struct PropagationTrace {
    window:          StepWindow,
    times:           Vec<f64>,
    susceptible:     Vec<usize>,
    infected:        Vec<usize>,
    recovered:       Vec<usize>,
    final_infected:  Vec<IndividualId>,
    final_recovered: Vec<IndividualId>,
}

impl PropagationTrace {
    /// Start a trace with the fed-in state at `window.start`.
    pub fn new(window: StepWindow, initial: CompartmentCounts) -> Self {
        let mut trace = Self {
            window,
            times:           Vec::new(),
            susceptible:     Vec::new(),
            infected:        Vec::new(),
            recovered:       Vec::new(),
            final_infected:  Vec::new(),
            final_recovered: Vec::new(),
        };
        trace.record(window.start, initial);
        trace
    }

    /// Build a trace from raw observation columns.
    ///
    /// Used to replay traces produced elsewhere.  Membership is left empty.
    pub fn from_observations(
        window:      StepWindow,
        times:       Vec<f64>,
        susceptible: Vec<usize>,
        infected:    Vec<usize>,
        recovered:   Vec<usize>,
    ) -> PropagationResult<Self> {
        let n = times.len();
        if n == 0 {
            return Err(PropagationError::MalformedTrace("no observations".into()));
        }
        if susceptible.len() != n || infected.len() != n || recovered.len() != n {
            return Err(PropagationError::MalformedTrace(format!(
                "column lengths differ: t={n}, S={}, I={}, R={}",
                susceptible.len(),
                infected.len(),
                recovered.len()
            )));
        }
        if times.windows(2).any(|w| w[1] < w[0]) {
            return Err(PropagationError::MalformedTrace("times are not non-decreasing".into()));
        }
        Ok(Self {
            window,
            times,
            susceptible,
            infected,
            recovered,
            final_infected:  Vec::new(),
            final_recovered: Vec::new(),
        })
    }

    /// Append one observation.
    #[inline]
    pub fn record(&mut self, t: f64, counts: CompartmentCounts) {
        self.times.push(t);
        self.susceptible.push(counts.susceptible);
        self.infected.push(counts.infected);
        self.recovered.push(counts.recovered);
    }

    /// Add the closing observation at `window.end` and attach the final
    /// membership.
    pub fn close(mut self, final_infected: Vec<IndividualId>, final_recovered: Vec<IndividualId>) -> Self {
        let last = self.last_counts();
        self.record(self.window.end, last);
        self.final_infected = final_infected;
        self.final_recovered = final_recovered;
        self
    }

    /// Replace the counts of the closing observation with the state handed
    /// to the next step.  The observation time is unchanged.
    pub fn restate_close(&mut self, counts: CompartmentCounts) {
        let Some(k) = self.len().checked_sub(1) else {
            return;
        };
        self.susceptible[k] = counts.susceptible;
        self.infected[k] = counts.infected;
        self.recovered[k] = counts.recovered;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn window(&self) -> StepWindow { self.window }
    #[inline] pub fn times(&self) -> &[f64] { &self.times }
    #[inline] pub fn susceptible(&self) -> &[usize] { &self.susceptible }
    #[inline] pub fn infected(&self) -> &[usize] { &self.infected }
    #[inline] pub fn recovered(&self) -> &[usize] { &self.recovered }
    #[inline] pub fn final_infected(&self) -> &[IndividualId] { &self.final_infected }
    #[inline] pub fn final_recovered(&self) -> &[IndividualId] { &self.final_recovered }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.times.first().copied()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Counts at observation `k`.  Panics if `k` is out of range.
    pub fn counts_at(&self, k: usize) -> CompartmentCounts {
        CompartmentCounts {
            susceptible: self.susceptible[k],
            infected:    self.infected[k],
            recovered:   self.recovered[k],
        }
    }

    /// Counts at the last observation (zero for an empty trace).
    pub fn last_counts(&self) -> CompartmentCounts {
        match self.len() {
            0 => CompartmentCounts::default(),
            n => self.counts_at(n - 1),
        }
    }

    /// Number of disease events (observations strictly inside the window).
    pub fn event_count(&self) -> usize {
        self.len().saturating_sub(2)
    }

    /// The membership the run continues with.
    pub fn final_lists(&self) -> CompartmentLists {
        CompartmentLists::new(self.final_infected.clone(), self.final_recovered.clone())
    }
}
