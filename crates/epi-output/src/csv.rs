//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `time_series.csv`
//! - `step_reports.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::{OutputResult, SeriesRow, StepRow};
use crate::writer::OutputWriter;

pub const SERIES_FILE: &str = "time_series.csv";
pub const STEPS_FILE: &str = "step_reports.csv";

const SERIES_HEADER: [&str; 5] = ["t", "susceptible", "infected", "recovered", "deaths"];

const STEPS_HEADER: [&str; 18] = [
    "step",
    "time",
    "susceptible",
    "infected",
    "recovered",
    "live",
    "events",
    "release_volume",
    "released_susceptible",
    "released_infected",
    "released_recovered",
    "admitted_susceptible",
    "admitted_infected",
    "admitted_recovered",
    "delta_recovered",
    "live_after_churn",
    "policy",
    "transmission_rate",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    series:   Writer<File>,
    steps:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) both CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut series = Writer::from_path(dir.join(SERIES_FILE))?;
        series.write_record(SERIES_HEADER)?;

        let mut steps = Writer::from_path(dir.join(STEPS_FILE))?;
        steps.write_record(STEPS_HEADER)?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self { series, steps, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_series(&mut self, rows: &[SeriesRow]) -> OutputResult<()> {
        for row in rows {
            self.series.write_record(&[
                row.t.to_string(),
                row.susceptible.to_string(),
                row.infected.to_string(),
                row.recovered.to_string(),
                row.deaths.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.to_string(),
            row.time.to_string(),
            row.susceptible.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
            row.live.to_string(),
            row.events.to_string(),
            row.release_volume.to_string(),
            row.released_susceptible.to_string(),
            row.released_infected.to_string(),
            row.released_recovered.to_string(),
            row.admitted_susceptible.to_string(),
            row.admitted_infected.to_string(),
            row.admitted_recovered.to_string(),
            row.delta_recovered.to_string(),
            row.live_after_churn.to_string(),
            row.policy.to_string(),
            row.transmission_rate.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.series.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
