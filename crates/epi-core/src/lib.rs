//! `epi-core` — foundational types for the facility epidemic workspace.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `IndividualId`                                        |
//! | [`compartment`] | `Compartment` enum (S, I, R)                          |
//! | [`time`]        | `Step`, `StepWindow`                                  |
//! | [`rng`]         | `SimRng` (the run's single random source)             |
//! | [`config`]      | `RunConfig` and its churn / intervention blocks       |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load a `RunConfig` from JSON.                  |

pub mod compartment;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use compartment::Compartment;
pub use config::{
    AdmissionMix, ChurnConfig, InitialInfection, InterventionConfig, RunConfig,
    PROBABILITY_TOLERANCE,
};
pub use error::{EpiError, EpiResult};
pub use ids::IndividualId;
pub use rng::SimRng;
pub use time::{Step, StepWindow};
