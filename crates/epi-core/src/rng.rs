//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from `RunConfig::seed`.  It is
//! threaded by `&mut` through graph generation, initial seeding, every
//! propagation step and every churn step, in that order.  Nothing in the
//! workspace touches `rand::thread_rng()`, so the same seed and the same
//! configuration always reproduce the same time series.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Single-threaded by construction: the step loop is strictly sequential and
/// no operation holds the RNG across a step boundary.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Exponentially distributed waiting time with the given `rate`.
    ///
    /// Returns `f64::INFINITY` for a zero (or negative) rate: the event never
    /// happens.
    #[inline]
    pub fn exponential(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        // 1 - U lies in (0, 1], so the log is finite.
        let u = 1.0 - self.unit();
        -u.ln() / rate
    }

    /// Remove and return a uniformly chosen element of `pool`.
    ///
    /// Sampling without replacement over the index range: the vacated slot is
    /// filled with the last element, so the remaining order is not meaningful.
    /// Returns `None` if `pool` is empty.
    #[inline]
    pub fn take_uniform<T>(&mut self, pool: &mut Vec<T>) -> Option<T> {
        if pool.is_empty() {
            return None;
        }
        let idx = self.0.gen_range(0..pool.len());
        Some(pool.swap_remove(idx))
    }

    /// Choose `amount` distinct elements of `slice` uniformly at random.
    ///
    /// Returns fewer than `amount` elements only when the slice is shorter.
    pub fn sample<T: Copy>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        let amount = amount.min(slice.len());
        rand::seq::index::sample(&mut self.0, slice.len(), amount)
            .into_iter()
            .map(|i| slice[i])
            .collect()
    }
}
