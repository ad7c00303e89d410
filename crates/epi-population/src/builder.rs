//! Fluent builder for the initial contact graph.
//!
//! # Usage
//!
//! ```rust
//! use epi_core::SimRng;
//! use epi_population::{ContactGraphBuilder, PopulationStore};
//!
//! let mut rng = SimRng::new(42);
//! let graph = ContactGraphBuilder::new(1_000)
//!     .edge_probability(5.0 / 999.0)
//!     .build(&mut rng);
//!
//! assert_eq!(graph.node_count(), 1_000);
//! ```

use epi_core::{IndividualId, SimRng};

use crate::{ContactGraph, PopulationStore};

/// Builds a G(n,p) random contact graph over individuals `0..n`.
///
/// Sparse graphs are generated with geometric edge skipping
/// (Batagelj & Brandes, 2005): instead of flipping a coin for each of the
/// `n(n-1)/2` pairs, the builder draws the gap to the next present edge, so
/// the cost is proportional to the number of edges produced.
pub struct ContactGraphBuilder {
    count:            usize,
    edge_probability: f64,
}

impl ContactGraphBuilder {
    /// Start a builder for `count` individuals with no contacts.
    pub fn new(count: usize) -> Self {
        Self { count, edge_probability: 0.0 }
    }

    /// Probability that any given pair of individuals is in contact.
    pub fn edge_probability(mut self, p: f64) -> Self {
        self.edge_probability = p;
        self
    }

    /// Generate the graph, consuming draws from `rng`.
    pub fn build(self, rng: &mut SimRng) -> ContactGraph {
        let n = self.count;
        let p = self.edge_probability;
        let mut graph = ContactGraph::with_nodes(n);

        if p <= 0.0 || n < 2 {
            return graph;
        }

        if p >= 1.0 {
            for v in 1..n as u32 {
                for w in 0..v {
                    graph.add_edge(IndividualId(v), IndividualId(w));
                }
            }
            return graph;
        }

        // Walk the lower triangle (v > w) row by row, jumping a geometric
        // number of pairs between edges.
        let log_q = (1.0 - p).ln();
        let n = n as i64;
        let mut v: i64 = 1;
        let mut w: i64 = -1;
        while v < n {
            let log_r = (1.0 - rng.unit()).ln();
            w += 1 + (log_r / log_q).floor() as i64;
            while w >= v && v < n {
                w -= v;
                v += 1;
            }
            if v < n {
                graph.add_edge(IndividualId(v as u32), IndividualId(w as u32));
            }
        }
        graph
    }
}
