//! `epi-population` — the facility population and its churn.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`store`]        | `PopulationStore` trait, `ContactGraph` (ordered adjacency)   |
//! | [`builder`]      | `ContactGraphBuilder` (G(n,p) generation)                     |
//! | [`compartments`] | `CompartmentLists`, `CompartmentCounts`                       |
//! | [`churn`]        | `ChurnEngine` — stratified release and admission              |
//! | [`error`]        | `ChurnError`, `ChurnResult<T>`                                |
//!
//! # Ownership
//!
//! Only the churn engine mutates the graph and the compartment lists between
//! propagation steps.  It takes the lists by value and returns the updated
//! lists, so a caller always holds exactly one current copy.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `CompartmentCounts`.  |

pub mod builder;
pub mod churn;
pub mod compartments;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::ContactGraphBuilder;
pub use churn::{AdmissionOutcome, ChurnEngine, ChurnOrder, ChurnOutcome, ReleaseOutcome};
pub use compartments::{CompartmentCounts, CompartmentLists};
pub use error::{ChurnError, ChurnResult};
pub use store::{ContactGraph, PopulationStore};
