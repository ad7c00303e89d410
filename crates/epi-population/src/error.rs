use thiserror::Error;

use epi_core::IndividualId;

#[derive(Debug, Error)]
pub enum ChurnError {
    /// More releases were requested than there are releasable individuals.
    /// Fatal: the run cannot continue with a consistent population.
    #[error("population exhausted: {requested} releases requested but only {releasable} individuals are releasable")]
    PopulationExhausted {
        requested:  usize,
        releasable: usize,
    },

    /// Admitting would need an id above `u32::MAX`.  Raised before any
    /// release or admission of the churn step.
    #[error("individual ids exhausted: cannot admit {requested} above {max_live}")]
    IdsExhausted {
        requested: usize,
        max_live:  IndividualId,
    },
}

pub type ChurnResult<T> = Result<T, ChurnError>;
