//! facility — run one correctional-facility outbreak with population churn.
//!
//! Starts from `RunConfig::default()` (3 000 individuals, 10 steps, 100
//! admissions per step, mass release at 200 infected), optionally overlaid by
//! a JSON config file and then by individual flags.  Prints the reconciled
//! `(t, S, I, R, D)` series summary as JSON.
//!
//! ```text
//! facility --max-time 20 --rho 0.02 --output output/facility
//! RUST_LOG=epi_sim=debug facility --config runs/baseline.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use epi_core::{AdmissionMix, InitialInfection, InterventionConfig, RunConfig};
use epi_output::{CsvWriter, OutputWriter, SimOutputObserver};
use epi_propagation::{EventDrivenSir, FrozenPropagation, PropagationStep};
use epi_series::{RunSummary, TimeSeries};
use epi_sim::{NoopObserver, SimBuilder};


// ── CLI ───────────────────────────────────────────────────────────────────────

const INTERVENTION_FLAGS: [&str; 4] =
    ["release_threshold", "release_number", "halt_turnover", "reduced_tau"];

/// Epidemic in a correctional facility with admissions and releases.
#[derive(Parser, Debug)]
#[command(name = "facility", version, about, long_about = None)]
struct Cli {
    /// JSON run configuration; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Individuals at time 0.
    #[arg(long)]
    population: Option<usize>,

    /// G(n,p) contact probability.
    #[arg(long)]
    edge_probability: Option<f64>,

    /// Number of unit-length steps.
    #[arg(long)]
    max_time: Option<u32>,

    /// Per-edge transmission rate.
    #[arg(long)]
    tau: Option<f64>,

    /// Per-individual recovery rate.
    #[arg(long)]
    gamma: Option<f64>,

    /// Initial infected count.
    #[arg(long, conflicts_with = "rho")]
    initial_infected: Option<usize>,

    /// Initial infected fraction of the population.
    #[arg(long)]
    rho: Option<f64>,

    /// Initial recovered count.
    #[arg(long)]
    initial_recovered: Option<usize>,

    /// Fraction of recovered individuals who die.
    #[arg(long)]
    death_rate: Option<f64>,

    /// Admissions per step.
    #[arg(long)]
    births: Option<usize>,

    /// Releases per step outside the intervention.
    #[arg(long)]
    turnover: Option<usize>,

    /// Fraction of admissions who arrive infected.
    #[arg(long)]
    admit_infected: Option<f64>,

    /// Fraction of admissions who arrive recovered.
    #[arg(long)]
    admit_recovered: Option<f64>,

    /// Disable the one-time mass release.
    #[arg(long, default_value_t = false, conflicts_with_all = INTERVENTION_FLAGS)]
    no_intervention: bool,

    /// Infected count that triggers the mass release.
    #[arg(long)]
    release_threshold: Option<usize>,

    /// Extra releases on the step the intervention fires.
    #[arg(long)]
    release_number: Option<usize>,

    /// Stop background turnover once the intervention fires.
    #[arg(long, default_value_t = false)]
    halt_turnover: bool,

    /// Transmission rate for every step after the intervention fires.
    #[arg(long)]
    reduced_tau: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Keep membership fixed within each step (churn only).
    #[arg(long, default_value_t = false)]
    frozen: bool,

    /// Directory for `time_series.csv` and `step_reports.csv`.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<RunConfig>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => RunConfig::default(),
        };

        if let Some(v) = self.population { config.population = v; }
        if let Some(v) = self.edge_probability { config.edge_probability = v; }
        if let Some(v) = self.max_time   { config.max_time = v; }
        if let Some(v) = self.tau        { config.transmission_rate = v; }
        if let Some(v) = self.gamma      { config.recovery_rate = v; }
        if let Some(v) = self.initial_infected { config.initial_infected = InitialInfection::Count(v); }
        if let Some(v) = self.rho        { config.initial_infected = InitialInfection::Fraction(v); }
        if let Some(v) = self.initial_recovered { config.initial_recovered = v; }
        if let Some(v) = self.death_rate { config.death_rate = v; }
        if let Some(v) = self.births     { config.churn.births_per_step = v; }
        if let Some(v) = self.turnover   { config.churn.background_turnover = v; }
        if let Some(v) = self.seed       { config.seed = v; }
        if self.admit_infected.is_some() || self.admit_recovered.is_some() {
            let mix = &config.churn.admission;
            config.churn.admission = AdmissionMix::from_infected_recovered(
                self.admit_infected.unwrap_or(mix.infected),
                self.admit_recovered.unwrap_or(mix.recovered),
            );
        }

        if self.no_intervention {
            config.intervention = None;
        } else if self.sets_intervention() {
            let intervention = config.intervention.get_or_insert_with(InterventionConfig::default);
            if let Some(v) = self.release_threshold { intervention.number_infected_before_release = v; }
            if let Some(v) = self.release_number    { intervention.release_number = v; }
            if self.halt_turnover                   { intervention.halt_background_turnover = true; }
            if let Some(v) = self.reduced_tau       { intervention.reduced_transmission_rate = Some(v); }
        }
        Ok(config)
    }

    fn sets_intervention(&self) -> bool {
        self.release_threshold.is_some()
            || self.release_number.is_some()
            || self.halt_turnover
            || self.reduced_tau.is_some()
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run<P: PropagationStep>(
    config:     RunConfig,
    propagator: P,
    output:     Option<&PathBuf>,
) -> Result<TimeSeries> {
    let mut sim = SimBuilder::new(config, propagator).build()?;

    let Some(dir) = output else {
        return Ok(sim.run(&mut NoopObserver)?);
    };

    let writer = CsvWriter::new(dir).with_context(|| format!("opening output in {}", dir.display()))?;
    let mut obs = SimOutputObserver::new(writer);
    let series = sim.run(&mut obs)?;
    check_output(&mut obs, dir)?;
    Ok(series)
}

/// Turn a write error stored during the run into a fatal one.
fn check_output<W: OutputWriter>(obs: &mut SimOutputObserver<W>, dir: &Path) -> Result<()> {
    match obs.take_error() {
        Some(e) => Err(anyhow::Error::new(e).context(format!("writing output to {}", dir.display()))),
        None => Ok(()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.run_config()?;
    info!(
        population = config.population,
        max_time = config.max_time,
        seed = config.seed,
        intervention = config.intervention.is_some(),
        "configuration loaded"
    );

    let t0 = Instant::now();
    let output = cli.output.as_ref();
    let series = if cli.frozen {
        run(config, FrozenPropagation, output)?
    } else {
        run(config, EventDrivenSir, output)?
    };
    info!(elapsed_secs = t0.elapsed().as_secs_f64(), "run complete");

    let summary = RunSummary::from_series(&series);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
