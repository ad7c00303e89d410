//! `epi-output` — simulation output writers for the facility epidemic
//! workspace.
//!
//! | Backend | Files created                            |
//! |---------|------------------------------------------|
//! | CSV     | `time_series.csv`, `step_reports.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `epi_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{SeriesRow, StepRow};
pub use writer::OutputWriter;
