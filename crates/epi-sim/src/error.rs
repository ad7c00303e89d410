use thiserror::Error;

use epi_core::EpiError;
use epi_population::ChurnError;
use epi_propagation::PropagationError;
use epi_series::SeriesError;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration or inconsistent initial membership.  Raised by
    /// the builder before any step runs.
    #[error(transparent)]
    Config(#[from] EpiError),

    #[error("population churn failed: {0}")]
    Churn(#[from] ChurnError),

    #[error("propagation step failed: {0}")]
    Propagation(#[from] PropagationError),

    #[error("time series is inconsistent: {0}")]
    Series(#[from] SeriesError),
}

pub type SimResult<T> = Result<T, SimError>;
