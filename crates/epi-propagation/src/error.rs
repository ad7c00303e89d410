use thiserror::Error;

use epi_core::{IndividualId, StepWindow};

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid propagation window {0}")]
    InvalidWindow(StepWindow),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("{0} is in the initial membership but not in the contact graph")]
    UnknownIndividual(IndividualId),

    #[error("{0} is listed more than once in the initial infected/recovered membership")]
    OverlappingMembership(IndividualId),

    #[error("malformed trace: {0}")]
    MalformedTrace(String),
}

pub type PropagationResult<T> = Result<T, PropagationError>;
