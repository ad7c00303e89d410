//! Plain data row types written by output backends.

use epi_series::SeriesPoint;
use epi_sim::StepReport;

/// One instant of the reconciled time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRow {
    pub t:           f64,
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub deaths:      u64,
}

impl From<SeriesPoint> for SeriesRow {
    fn from(p: SeriesPoint) -> Self {
        Self {
            t:           p.t,
            susceptible: p.susceptible as u64,
            infected:    p.infected as u64,
            recovered:   p.recovered as u64,
            deaths:      p.deaths as u64,
        }
    }
}

/// Flattened [`StepReport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRow {
    pub step:                 u32,
    pub time:                 f64,
    pub susceptible:          u64,
    pub infected:             u64,
    pub recovered:            u64,
    pub live:                 u64,
    pub events:               u64,
    pub release_volume:       u64,
    pub released_susceptible: u64,
    pub released_infected:    u64,
    pub released_recovered:   u64,
    pub admitted_susceptible: u64,
    pub admitted_infected:    u64,
    pub admitted_recovered:   u64,
    pub delta_recovered:      i64,
    pub live_after_churn:     u64,
    /// `"pending"` or `"fired"`.
    pub policy:               &'static str,
    pub transmission_rate:    f64,
}

impl From<&StepReport> for StepRow {
    fn from(r: &StepReport) -> Self {
        Self {
            step:                 r.step.0,
            time:                 r.time,
            susceptible:          r.counts.susceptible as u64,
            infected:             r.counts.infected as u64,
            recovered:            r.counts.recovered as u64,
            live:                 r.live as u64,
            events:               r.events as u64,
            release_volume:       r.release_volume as u64,
            released_susceptible: r.released.susceptible as u64,
            released_infected:    r.released.infected as u64,
            released_recovered:   r.released.recovered as u64,
            admitted_susceptible: r.admitted.susceptible as u64,
            admitted_infected:    r.admitted.infected as u64,
            admitted_recovered:   r.admitted.recovered as u64,
            delta_recovered:      r.delta_recovered,
            live_after_churn:     r.live_after_churn as u64,
            policy:               r.policy.as_str(),
            transmission_rate:    r.transmission_rate,
        }
    }
}
