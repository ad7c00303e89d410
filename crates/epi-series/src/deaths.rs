//! Deriving the deaths channel from the recovered series.
//!
//! # Rule
//!
//! ```text
//! C(k) = Σ delta[i] × death_rate   over steps i ≥ 1 whose churn instant ≤ k
//! D(k) = ceil(R(k) × death_rate − C(k))   clamped to [0, R(k)]
//! R'(k) = R(k) − D(k)
//! ```
//!
//! A step's churn instant is the first observation whose integer time is
//! the step index.  `delta[i]` is the recovered admitted minus recovered
//! released by the churn that ran at time `i`.  Recovered who arrived from
//! outside recovered elsewhere and add no deaths here.  Recovered who left
//! no longer appear in `R`, but the deaths already attributed to them stay
//! counted.  Both effects enter `D` through `C` from that instant on.
//!
//! Clamping only changes `D` when churn corrections outweigh the recovered
//! count; it keeps `R' + D = R` exact at every instant.

use tracing::warn;

use epi_propagation::PropagationTrace;

use crate::{SeriesError, SeriesResult, TimeSeries, Timeline, aggregate};

/// Absorbs float noise in `R × death_rate` before taking the ceiling, so
/// that e.g. `250 × 0.012 = 3.0000000000000004` counts as 3 deaths.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Split the aggregated recovered series into presumed-alive recovered and
/// deaths.
///
/// `deltas[i]` is the churn delta applied at time `i`; `deltas[0]` is
/// ignored since no churn precedes the first step.
pub fn reconcile_deaths(timeline: &Timeline, deltas: &[i64], death_rate: f64) -> SeriesResult<TimeSeries> {
    if !(0.0..=1.0).contains(&death_rate) {
        return Err(SeriesError::InvalidDeathRate(death_rate));
    }
    if timeline.is_empty() {
        return Err(SeriesError::EmptyTimeline);
    }

    // (first instant, correction) per step with recovered churn.
    let mut corrections: Vec<(usize, f64)> = Vec::new();
    for (step, &delta) in deltas.iter().enumerate().skip(1) {
        if delta == 0 {
            continue;
        }
        let Some(k) = timeline.first_instant_of_step(step) else {
            return Err(SeriesError::MissingChurnInstant { step, delta });
        };
        corrections.push((k, delta as f64 * death_rate));
    }
    corrections.sort_by_key(|&(k, _)| k);

    let n = timeline.len();
    let mut r = Vec::with_capacity(n);
    let mut d = Vec::with_capacity(n);
    let mut pending = corrections.into_iter().peekable();
    let mut carried = 0.0;
    let mut clamped = 0usize;

    for (k, &recovered) in timeline.r.iter().enumerate() {
        while let Some((_, c)) = pending.next_if(|&(start, _)| start <= k) {
            carried += c;
        }
        let raw = recovered as f64 * death_rate - carried;
        let deaths = (raw - CEIL_TOLERANCE).ceil();
        let deaths = if deaths < 0.0 {
            clamped += 1;
            0
        } else if deaths > recovered as f64 {
            clamped += 1;
            recovered
        } else {
            deaths as usize
        };
        d.push(deaths);
        r.push(recovered - deaths);
    }

    if clamped > 0 {
        warn!(clamped, instants = n, "deaths clamped to [0, R] after churn correction");
    }

    TimeSeries::from_columns(timeline.t.clone(), timeline.s.clone(), timeline.i.clone(), r, d)
}

/// Aggregate then reconcile in one call.
pub fn reconcile(traces: &[PropagationTrace], deltas: &[i64], death_rate: f64) -> SeriesResult<TimeSeries> {
    let timeline = aggregate(traces)?;
    reconcile_deaths(&timeline, deltas, death_rate)
}
