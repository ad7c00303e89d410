//! `epi-series` — from per-step traces to the final `(t, S, I, R, D)` series.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`timeline`] | `Timeline`, `aggregate` — boundary-aware trace concatenation    |
//! | [`deaths`]   | `reconcile_deaths` — deaths carved out of R, churn-corrected   |
//! | [`series`]   | `TimeSeries`, `SeriesPoint`                                     |
//! | [`summary`]  | `RunSummary`, total infections / deaths, peak infected          |
//! | [`error`]    | `SeriesError`, `SeriesResult<T>`                                |
//!
//! Both passes run once, after the last step, and only read the traces and
//! churn deltas the simulation recorded.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the series and summary.   |

pub mod deaths;
pub mod error;
pub mod series;
pub mod summary;
pub mod timeline;


pub use deaths::{reconcile, reconcile_deaths};
pub use error::{SeriesError, SeriesResult};
pub use series::{SeriesPoint, TimeSeries};
pub use summary::{RunSummary, peak_infected, total_deaths, total_infections};
pub use timeline::{Timeline, aggregate};
