//! Population storage: the [`PopulationStore`] seam and its default
//! implementation, [`ContactGraph`].
//!
//! # Why a trait?
//!
//! The churn engine and the propagation engine only need a handful of
//! operations on the population: add/remove an individual, add a contact,
//! enumerate individuals and their contacts, and find the largest live id.
//! Keeping those behind a trait lets tests drive the churn engine against a
//! hand-built graph and lets applications swap in a different graph
//! representation without touching the core.
//!
//! # Determinism
//!
//! `ContactGraph` keeps its adjacency in ordered maps and sets.  Node and
//! neighbor enumeration order is therefore a pure function of the sequence of
//! mutations, which is what makes a seeded run reproducible: every random
//! draw that walks the population walks it in the same order.

use std::collections::{BTreeMap, BTreeSet};

use epi_core::IndividualId;

// ── PopulationStore ───────────────────────────────────────────────────────────

/// Mutable graph of individuals (nodes) and contacts (undirected edges).
pub trait PopulationStore {
    /// Insert an individual with no contacts.  Returns `false` if `id` was
    /// already live.
    fn add_node(&mut self, id: IndividualId) -> bool;

    /// Remove an individual and all its contacts.  Returns `false` if `id`
    /// was not live.
    fn remove_node(&mut self, id: IndividualId) -> bool;

    /// Insert the undirected contact `u — v`.
    ///
    /// Returns `true` only if a new edge was created.  Self-loops and edges
    /// touching absent individuals are never created.
    fn add_edge(&mut self, u: IndividualId, v: IndividualId) -> bool;

    /// All live individuals.
    fn nodes(&self) -> impl Iterator<Item = IndividualId> + '_;

    /// Contacts of `id`; empty if `id` is not live.
    fn neighbors(&self, id: IndividualId) -> impl Iterator<Item = IndividualId> + '_;

    fn contains(&self, id: IndividualId) -> bool;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Largest live id, or `None` for an empty population.
    fn max_live_id(&self) -> Option<IndividualId>;

    /// The id the next admission should receive: strictly greater than every
    /// live id.  `None` when the largest live id is `u32::MAX`.
    #[inline]
    fn next_free_id(&self) -> Option<IndividualId> {
        match self.max_live_id() {
            None     => Some(IndividualId(0)),
            Some(id) => id.checked_next(),
        }
    }
}

// ── ContactGraph ──────────────────────────────────────────────────────────────

/// Undirected contact graph with ordered adjacency.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactGraph {
    adjacency: BTreeMap<IndividualId, BTreeSet<IndividualId>>,
    edges:     usize,
}

impl ContactGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with individuals `0..count` and no contacts.
    pub fn with_nodes(count: usize) -> Self {
        let adjacency = (0..count as u32)
            .map(|i| (IndividualId(i), BTreeSet::new()))
            .collect();
        Self { adjacency, edges: 0 }
    }

    /// Number of contacts of `id` (0 if not live).
    pub fn degree(&self, id: IndividualId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    /// `true` if the contact `u — v` exists.
    pub fn has_edge(&self, u: IndividualId, v: IndividualId) -> bool {
        self.adjacency.get(&u).is_some_and(|n| n.contains(&v))
    }

    /// Mean contacts per individual.
    pub fn mean_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            return 0.0;
        }
        2.0 * self.edges as f64 / self.adjacency.len() as f64
    }
}

impl PopulationStore for ContactGraph {
    fn add_node(&mut self, id: IndividualId) -> bool {
        if self.adjacency.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id, BTreeSet::new());
        true
    }

    fn remove_node(&mut self, id: IndividualId) -> bool {
        let Some(contacts) = self.adjacency.remove(&id) else {
            return false;
        };
        for other in &contacts {
            if let Some(back) = self.adjacency.get_mut(other) {
                back.remove(&id);
            }
        }
        self.edges -= contacts.len();
        true
    }

    fn add_edge(&mut self, u: IndividualId, v: IndividualId) -> bool {
        if u == v || !self.adjacency.contains_key(&v) {
            return false;
        }
        let Some(out) = self.adjacency.get_mut(&u) else {
            return false;
        };
        if !out.insert(v) {
            return false;
        }
        if let Some(back) = self.adjacency.get_mut(&v) {
            back.insert(u);
        }
        self.edges += 1;
        true
    }

    fn nodes(&self) -> impl Iterator<Item = IndividualId> + '_ {
        self.adjacency.keys().copied()
    }

    fn neighbors(&self, id: IndividualId) -> impl Iterator<Item = IndividualId> + '_ {
        self.adjacency.get(&id).into_iter().flat_map(|n| n.iter().copied())
    }

    #[inline]
    fn contains(&self, id: IndividualId) -> bool {
        self.adjacency.contains_key(&id)
    }

    #[inline]
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges
    }

    #[inline]
    fn max_live_id(&self) -> Option<IndividualId> {
        self.adjacency.last_key_value().map(|(&id, _)| id)
    }
}
