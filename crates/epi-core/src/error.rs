//! Base error type.
//!
//! Sub-crates define their own error enums for the failures they own
//! (population exhaustion, trace inconsistencies, …) and wrap `EpiError` as
//! one variant where they need to surface configuration or identity errors.

use thiserror::Error;

use crate::IndividualId;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    /// Rejected before any propagation step executes.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0} is not a live individual")]
    UnknownIndividual(IndividualId),

    /// An id listed in more than one compartment, or twice in one.
    #[error("{0} appears in more than one compartment slot")]
    DuplicateMembership(IndividualId),
}

/// Shorthand result type for `epi-core` operations.
pub type EpiResult<T> = Result<T, EpiError>;
