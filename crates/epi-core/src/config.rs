//! Run configuration.
//!
//! One immutable [`RunConfig`] describes a whole run.  It is built by the
//! application (from CLI flags or a JSON file with the `serde` feature),
//! validated once by [`RunConfig::validate`], and then only ever read: the
//! churn engine and the intervention policy copy the blocks they need at
//! construction.

use crate::{EpiError, EpiResult};

/// Tolerance for "probabilities sum to one".
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

// ── InitialInfection ──────────────────────────────────────────────────────────

/// How many individuals are infected at time 0.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialInfection {
    /// An exact number of individuals.
    Count(usize),
    /// A fraction of the initial population, rounded to the nearest integer.
    Fraction(f64),
}

impl InitialInfection {
    /// Number of individuals to infect in a population of `population`.
    pub fn resolve(self, population: usize) -> usize {
        match self {
            InitialInfection::Count(n) => n,
            InitialInfection::Fraction(rho) => (rho * population as f64).round() as usize,
        }
    }
}

// ── AdmissionMix ──────────────────────────────────────────────────────────────

/// Compartment distribution of newly admitted individuals.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdmissionMix {
    pub susceptible: f64,
    pub infected:    f64,
    pub recovered:   f64,
}

impl AdmissionMix {
    /// Mix with the given infected and recovered shares; susceptible takes the rest.
    pub fn from_infected_recovered(infected: f64, recovered: f64) -> Self {
        Self { susceptible: 1.0 - infected - recovered, infected, recovered }
    }

    /// Every admission is susceptible.
    pub fn all_susceptible() -> Self {
        Self { susceptible: 1.0, infected: 0.0, recovered: 0.0 }
    }

    fn validate(&self) -> EpiResult<()> {
        check_probability("admission.susceptible", self.susceptible)?;
        check_probability("admission.infected", self.infected)?;
        check_probability("admission.recovered", self.recovered)?;
        let sum = self.susceptible + self.infected + self.recovered;
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(EpiError::Config(format!(
                "admission probabilities must sum to 1, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for AdmissionMix {
    fn default() -> Self {
        Self::from_infected_recovered(0.0035, 0.0015)
    }
}

// ── ChurnConfig ───────────────────────────────────────────────────────────────

/// Per-step population turnover outside the disease dynamics.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChurnConfig {
    /// Individuals admitted at the end of every step.
    pub births_per_step: usize,
    /// Individuals released at the end of every step, intervention aside.
    pub background_turnover: usize,
    /// Compartment of each admission.
    pub admission: AdmissionMix,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            births_per_step:     100,
            background_turnover: 0,
            admission:           AdmissionMix::default(),
        }
    }
}

// ── InterventionConfig ────────────────────────────────────────────────────────

/// One-time mass release triggered by the live infected count.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InterventionConfig {
    /// Fire on the first step whose infected count is at least this.
    pub number_infected_before_release: usize,
    /// Extra releases on the firing step, on top of background turnover.
    pub release_number: usize,
    /// Set background turnover to 0 for the rest of the run once fired.
    pub halt_background_turnover: bool,
    /// Permanently replace the transmission rate once fired.
    pub reduced_transmission_rate: Option<f64>,
}

impl Default for InterventionConfig {
    fn default() -> Self {
        Self {
            number_infected_before_release: 200,
            release_number:                 500,
            halt_background_turnover:       false,
            reduced_transmission_rate:      None,
        }
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Individuals in the facility at time 0.
    pub population: usize,

    /// G(n,p) contact probability, for the initial graph and for admissions.
    pub edge_probability: f64,

    /// Per-contact transmission rate (τ) handed to the propagation engine.
    pub transmission_rate: f64,

    /// Per-individual recovery rate (γ) handed to the propagation engine.
    pub recovery_rate: f64,

    /// Infected individuals at time 0.
    pub initial_infected: InitialInfection,

    /// Recovered individuals at time 0.
    pub initial_recovered: usize,

    /// Number of discrete steps.  Must be positive.
    pub max_time: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Fraction of recovered individuals who actually died.
    pub death_rate: f64,

    pub churn: ChurnConfig,

    /// `None` disables the intervention policy entirely.
    pub intervention: Option<InterventionConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population:        3_000,
            edge_probability:  0.02,
            transmission_rate: 0.03,
            recovery_rate:     1.0,
            initial_infected:  InitialInfection::Fraction(0.0003),
            initial_recovered: 0,
            max_time:          10,
            seed:              42,
            death_rate:        0.012,
            churn:             ChurnConfig::default(),
            intervention:      Some(InterventionConfig::default()),
        }
    }
}

impl RunConfig {
    /// Check every parameter.  Called by the simulation builder before the
    /// first step; nothing runs on an invalid configuration.
    pub fn validate(&self) -> EpiResult<()> {
        if self.max_time == 0 {
            return Err(EpiError::Config("max_time must be positive".into()));
        }
        check_probability("edge_probability", self.edge_probability)?;
        check_rate("transmission_rate", self.transmission_rate)?;
        check_rate("recovery_rate", self.recovery_rate)?;
        check_probability("death_rate", self.death_rate)?;

        if let InitialInfection::Fraction(rho) = self.initial_infected {
            check_probability("initial_infected fraction", rho)?;
        }
        let seeded = self.initial_infected.resolve(self.population) + self.initial_recovered;
        if seeded > self.population {
            return Err(EpiError::Config(format!(
                "{seeded} initially infected/recovered individuals exceed population {}",
                self.population
            )));
        }

        self.churn.admission.validate()?;

        if let Some(intervention) = &self.intervention
            && let Some(rate) = intervention.reduced_transmission_rate
        {
            check_rate("reduced_transmission_rate", rate)?;
        }
        Ok(())
    }

    /// Number of initially infected individuals for this configuration.
    #[inline]
    pub fn initial_infected_count(&self) -> usize {
        self.initial_infected.resolve(self.population)
    }
}

fn check_probability(name: &str, p: f64) -> EpiResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(EpiError::Config(format!("{name} must lie in [0, 1], got {p}")));
    }
    Ok(())
}

fn check_rate(name: &str, rate: f64) -> EpiResult<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(EpiError::Config(format!(
            "{name} must be finite and non-negative, got {rate}"
        )));
    }
    Ok(())
}
