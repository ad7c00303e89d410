//! Disease compartment enum shared by every crate in the workspace.
//!
//! Membership is never stored on the individual itself: the infected and
//! recovered lists in `epi-population` are the source of truth, and
//! susceptibility is whatever is left over.  This enum is the closed tag used
//! wherever code has to decide *which* of the three sets something belongs to.

/// One of the three mutually exclusive disease states.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compartment {
    Susceptible,
    Infected,
    Recovered,
}

impl Compartment {
    /// All three compartments in S, I, R order.
    pub const ALL: [Compartment; 3] = [
        Compartment::Susceptible,
        Compartment::Infected,
        Compartment::Recovered,
    ];

    /// Position in [`Compartment::ALL`]; handy for fixed-size per-compartment arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Compartment::Susceptible => 0,
            Compartment::Infected    => 1,
            Compartment::Recovered   => 2,
        }
    }

    /// Single-letter label used in CSV headers and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Compartment::Susceptible => "S",
            Compartment::Infected    => "I",
            Compartment::Recovered   => "R",
        }
    }
}

impl std::fmt::Display for Compartment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
