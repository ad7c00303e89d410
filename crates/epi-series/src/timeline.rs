//! Stitching per-step traces into one continuous timeline.
//!
//! Step `i`'s trace closes with an observation at `t = i + 1` holding the
//! state handed to step `i + 1`, churn included; step `i + 1`'s trace opens
//! at the same instant with the same state.  Keeping both would give two
//! samples at one instant, so the opening sample of every step after the
//! first is dropped.  The boundary sample that remains is the first
//! instant of step `i + 1` and carries the post-churn counts.
//!
//! ```text
//! step 0:  0.0  0.3  0.8  1.0
//! step 1:                 1.0  1.2  2.0      ← first sample dropped
//! merged:  0.0  0.3  0.8  1.0  1.2  2.0
//! ```

use epi_propagation::PropagationTrace;

use crate::{SeriesError, SeriesResult};

/// Aggregated S/I/R counts before death reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub t: Vec<f64>,
    pub s: Vec<usize>,
    pub i: Vec<usize>,
    pub r: Vec<usize>,
}

impl Timeline {
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Index of the first instant whose integer part is `step`.
    pub fn first_instant_of_step(&self, step: usize) -> Option<usize> {
        let target = step as f64;
        self.t.iter().position(|&t| t.floor() == target)
    }

    fn extend_from(&mut self, trace: &PropagationTrace, skip: usize) {
        self.t.extend_from_slice(&trace.times()[skip..]);
        self.s.extend_from_slice(&trace.susceptible()[skip..]);
        self.i.extend_from_slice(&trace.infected()[skip..]);
        self.r.extend_from_slice(&trace.recovered()[skip..]);
    }
}

/// Concatenate `traces` in step order.
///
/// Every trace must be non-empty and each one must open exactly where the
/// previous one closed.  For `N` traces of `L` samples the result has
/// `L + (N − 1)(L − 1)` samples.
pub fn aggregate(traces: &[PropagationTrace]) -> SeriesResult<Timeline> {
    if traces.is_empty() {
        return Err(SeriesError::EmptyTimeline);
    }

    let capacity = traces.iter().map(PropagationTrace::len).sum::<usize>();
    let mut timeline = Timeline {
        t: Vec::with_capacity(capacity),
        s: Vec::with_capacity(capacity),
        i: Vec::with_capacity(capacity),
        r: Vec::with_capacity(capacity),
    };

    let mut previous_end: Option<f64> = None;
    for (step, trace) in traces.iter().enumerate() {
        let (Some(start), Some(end)) = (trace.first_time(), trace.last_time()) else {
            return Err(SeriesError::EmptyTrace { step });
        };
        match previous_end {
            None => timeline.extend_from(trace, 0),
            Some(previous_end) => {
                if previous_end != start {
                    return Err(SeriesError::BoundaryMismatch { step, previous_end, next_start: start });
                }
                timeline.extend_from(trace, 1);
            }
        }
        previous_end = Some(end);
    }

    Ok(timeline)
}
