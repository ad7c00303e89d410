//! The one-shot intervention policy.
//!
//! ```text
//!            infected ≥ threshold
//!   Pending ─────────────────────▶ Fired(step)      (terminal)
//!
//!   release volume:
//!     Pending, below threshold  → background
//!     the firing step           → background + release_number
//!     Fired, every later step   → background (0 if halted)
//! ```

use std::fmt;

use tracing::info;

use epi_core::{InterventionConfig, RunConfig, Step};

/// Where the policy is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PolicyState {
    Pending,
    /// Fired after propagation of the given step.  Never reverts.
    Fired(Step),
}

impl PolicyState {
    #[inline]
    pub fn is_fired(self) -> bool {
        matches!(self, PolicyState::Fired(_))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyState::Pending  => "pending",
            PolicyState::Fired(_) => "fired",
        }
    }
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the policy decided for one step.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct InterventionDecision {
    /// Individuals to release at the end of this step.
    pub releases: usize,
    /// `true` only on the step where the policy fired.
    pub fired: bool,
}

/// Decides the per-step release volume and, once, the intervention.
///
/// Owns the two run parameters an intervention may change for good: the
/// background turnover and the transmission rate.
#[derive(Clone, Debug)]
pub struct InterventionPolicy {
    config:              Option<InterventionConfig>,
    state:               PolicyState,
    background_turnover: usize,
    transmission_rate:   f64,
}

impl InterventionPolicy {
    /// `config == None` never fires; every step releases `background_turnover`.
    pub fn new(
        config:              Option<InterventionConfig>,
        background_turnover: usize,
        transmission_rate:   f64,
    ) -> Self {
        Self { config, state: PolicyState::Pending, background_turnover, transmission_rate }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            config.intervention.clone(),
            config.churn.background_turnover,
            config.transmission_rate,
        )
    }

    #[inline]
    pub fn state(&self) -> PolicyState {
        self.state
    }

    /// Current background release volume per step.
    #[inline]
    pub fn background_turnover(&self) -> usize {
        self.background_turnover
    }

    /// Transmission rate to hand to the next propagation step.
    #[inline]
    pub fn transmission_rate(&self) -> f64 {
        self.transmission_rate
    }

    /// Evaluate the policy against the live infected count after `step`'s
    /// propagation.
    pub fn evaluate(&mut self, step: Step, infected: usize) -> InterventionDecision {
        let background = self.background_turnover;
        let Some(config) = &self.config else {
            return InterventionDecision { releases: background, fired: false };
        };
        if self.state.is_fired() || infected < config.number_infected_before_release {
            return InterventionDecision { releases: background, fired: false };
        }

        self.state = PolicyState::Fired(step);
        if config.halt_background_turnover {
            self.background_turnover = 0;
        }
        if let Some(rate) = config.reduced_transmission_rate {
            self.transmission_rate = rate;
        }
        info!(
            %step,
            infected,
            threshold = config.number_infected_before_release,
            releases = background + config.release_number,
            halt_background = config.halt_background_turnover,
            transmission_rate = self.transmission_rate,
            "intervention fired"
        );

        InterventionDecision { releases: background + config.release_number, fired: true }
    }
}
