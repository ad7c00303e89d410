//! The reconciled `(t, S, I, R, D)` time series.

use crate::{SeriesError, SeriesResult};

/// One instant of a [`TimeSeries`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesPoint {
    pub t:           f64,
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,
    pub deaths:      usize,
}

/// Final output of a run: one entry per observation instant.
///
/// `r` holds the recovered who are presumed alive and `d` those presumed
/// dead; `r[k] + d[k]` is the recovered count the propagation engine saw.
/// Deceased individuals are never removed from the contact graph, so
/// `s + i + r + d` equals the live node count at that instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries {
    pub t: Vec<f64>,
    pub s: Vec<usize>,
    pub i: Vec<usize>,
    pub r: Vec<usize>,
    pub d: Vec<usize>,
}

impl TimeSeries {
    /// Assemble a series from columns of equal length.
    pub fn from_columns(
        t: Vec<f64>,
        s: Vec<usize>,
        i: Vec<usize>,
        r: Vec<usize>,
        d: Vec<usize>,
    ) -> SeriesResult<Self> {
        let expected = t.len();
        for (what, actual) in [("S", s.len()), ("I", i.len()), ("R", r.len()), ("D", d.len())] {
            if actual != expected {
                return Err(SeriesError::LengthMismatch { what, expected, actual });
            }
        }
        Ok(Self { t, s, i, r, d })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Recovered count before deaths were carved out, `R + D`.
    #[inline]
    pub fn raw_recovered(&self, k: usize) -> usize {
        self.r[k] + self.d[k]
    }

    /// `S + I + R + D` at instant `k`.
    #[inline]
    pub fn population(&self, k: usize) -> usize {
        self.s[k] + self.i[k] + self.r[k] + self.d[k]
    }

    pub fn point(&self, k: usize) -> SeriesPoint {
        SeriesPoint {
            t:           self.t[k],
            susceptible: self.s[k],
            infected:    self.i[k],
            recovered:   self.r[k],
            deaths:      self.d[k],
        }
    }

    pub fn last(&self) -> Option<SeriesPoint> {
        self.len().checked_sub(1).map(|k| self.point(k))
    }

    pub fn points(&self) -> impl Iterator<Item = SeriesPoint> + '_ {
        (0..self.len()).map(|k| self.point(k))
    }
}
