//! `epi-propagation` — disease propagation over one step window.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`request`]      | `StepRequest<'a>` — read-only inputs of one step             |
//! | [`trace`]        | `PropagationTrace` — observations plus final membership      |
//! | [`model`]        | `PropagationStep` trait                                      |
//! | [`event_driven`] | `EventDrivenSir` — continuous-time SIR, the default engine   |
//! | [`frozen`]       | `FrozenPropagation` — no events, membership passes through   |
//! | [`error`]        | `PropagationError`, `PropagationResult<T>`                   |
//!
//! # Design notes
//!
//! The simulation driver alternates two phases per step:
//!
//! 1. **Propagation**: build a `StepRequest` borrowing the graph and the
//!    current lists, call `PropagationStep::advance`, keep the trace.
//! 2. **Churn**: adopt the trace's final membership, then hand graph and
//!    lists to the churn engine, which is the only writer.
//!
//! Engines therefore never need mutable access to the population.

pub mod error;
pub mod event_driven;
pub mod frozen;
pub mod model;
pub mod request;
pub mod trace;


pub use error::{PropagationError, PropagationResult};
pub use event_driven::EventDrivenSir;
pub use frozen::FrozenPropagation;
pub use model::PropagationStep;
pub use request::StepRequest;
pub use trace::PropagationTrace;
