//! Discrete step model.
//!
//! # Design
//!
//! The run advances in whole time units.  Step `i` covers the window
//! `[i, i + 1)`: the propagation engine evolves the disease continuously
//! inside the window, and population churn happens exactly at the window end,
//! before step `i + 1` begins.
//!
//! Continuous event times inside a window are `f64`; step indices are `u32`.
//! `Step::window()` is the only place the two meet.

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// Index of one discrete time unit of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u32);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// The half-open time window `[self, self + 1)` this step covers.
    #[inline]
    pub fn window(self) -> StepWindow {
        StepWindow {
            start: self.0 as f64,
            end:   (self.0 + 1) as f64,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Add<u32> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u32) -> Step {
        Step(self.0 + rhs)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}", self.0)
    }
}

// ── StepWindow ────────────────────────────────────────────────────────────────

/// Continuous time window handed to the propagation engine.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepWindow {
    pub start: f64,
    pub end:   f64,
}

impl StepWindow {
    /// `true` if `start < end` and both ends are finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }

    /// `true` if `t` lies strictly inside the window or on its start.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for StepWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
