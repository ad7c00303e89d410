//! Headline statistics of a reconciled series.

use crate::TimeSeries;

/// Cumulative infections: the initial infected count plus every increase
/// in `I` between consecutive instants.
///
/// Decreases (recoveries, releases) are ignored, so this counts each
/// infection once even when the infected compartment churns.
pub fn total_infections(infected: &[usize]) -> usize {
    let Some(&first) = infected.first() else {
        return 0;
    };
    first
        + infected
            .windows(2)
            .map(|w| w[1].saturating_sub(w[0]))
            .sum::<usize>()
}

/// Deaths at the final instant.
pub fn total_deaths(deaths: &[usize]) -> usize {
    deaths.last().copied().unwrap_or(0)
}

/// Highest infected count and the first instant it was reached.
pub fn peak_infected(t: &[f64], infected: &[usize]) -> Option<(f64, usize)> {
    let mut peak: Option<(f64, usize)> = None;
    for (&time, &count) in t.iter().zip(infected) {
        if peak.is_none_or(|(_, best)| count > best) {
            peak = Some((time, count));
        }
    }
    peak
}

/// Summary printed at the end of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub observations:      usize,
    pub final_time:        f64,
    pub total_infections:  usize,
    pub total_deaths:      usize,
    pub peak_infected:     usize,
    pub peak_time:         f64,
    pub final_susceptible: usize,
    pub final_infected:    usize,
    pub final_recovered:   usize,
}

impl RunSummary {
    pub fn from_series(series: &TimeSeries) -> Self {
        let (peak_time, peak_infected) = peak_infected(&series.t, &series.i).unwrap_or((0.0, 0));
        let last = series.last();
        Self {
            observations:      series.len(),
            final_time:        last.map_or(0.0, |p| p.t),
            total_infections:  total_infections(&series.i),
            total_deaths:      total_deaths(&series.d),
            peak_infected,
            peak_time,
            final_susceptible: last.map_or(0, |p| p.susceptible),
            final_infected:    last.map_or(0, |p| p.infected),
            final_recovered:   last.map_or(0, |p| p.recovered),
        }
    }
}
