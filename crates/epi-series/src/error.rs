use thiserror::Error;

/// Data-consistency failures while assembling the time series.
///
/// All are fatal: they mean the per-step traces or churn deltas disagree
/// with each other, and any series built from them would be wrong.
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("no propagation traces to aggregate")]
    EmptyTimeline,

    #[error("trace for step {step} has no observations")]
    EmptyTrace { step: usize },

    #[error("step {step} starts at t={next_start} but the previous step ended at t={previous_end}")]
    BoundaryMismatch {
        step:         usize,
        previous_end: f64,
        next_start:   f64,
    },

    #[error("churn delta {delta} for step {step} has no observation instant with integer time {step}")]
    MissingChurnInstant { step: usize, delta: i64 },

    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what:     &'static str,
        expected: usize,
        actual:   usize,
    },

    #[error("death rate must lie in [0, 1], got {0}")]
    InvalidDeathRate(f64),
}

pub type SeriesResult<T> = Result<T, SeriesError>;
