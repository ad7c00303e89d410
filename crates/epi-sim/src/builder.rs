//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use epi_core::{RunConfig, SimRng};
use epi_population::{CompartmentLists, ContactGraph, ContactGraphBuilder, PopulationStore};
use epi_propagation::PropagationStep;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`RunConfig`] — population, rates, churn, intervention, seed, …
/// - `P: PropagationStep` — the propagation engine (e.g.
///   [`epi_propagation::EventDrivenSir`])
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                           |
/// |-----------------------|---------------------------------------------------|
/// | `.graph(g)`           | G(n, p) with `population` and `edge_probability`  |
/// | `.initial_lists(l)`   | Uniformly seeded infected and recovered           |
///
/// The run's single [`SimRng`] is created from `config.seed` and draws the
/// graph first, then the seeding, then every step.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, EventDrivenSir).build()?;
/// let series = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PropagationStep> {
    config:     RunConfig,
    propagator: P,
    graph:      Option<ContactGraph>,
    lists:      Option<CompartmentLists>,
}

impl<P: PropagationStep> SimBuilder<P> {
    pub fn new(config: RunConfig, propagator: P) -> Self {
        Self { config, propagator, graph: None, lists: None }
    }

    /// Start from an existing contact graph instead of generating one.
    ///
    /// `population` and `edge_probability` in the config then only govern
    /// admissions.
    pub fn graph(mut self, graph: ContactGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Supply the initial infected/recovered membership.
    ///
    /// Checked against the graph at build time.
    pub fn initial_lists(mut self, lists: CompartmentLists) -> Self {
        self.lists = Some(lists);
        self
    }

    /// Validate the configuration, generate whatever was not supplied, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        let mut rng = SimRng::new(self.config.seed);

        let graph = match self.graph {
            Some(g) => g,
            None => ContactGraphBuilder::new(self.config.population)
                .edge_probability(self.config.edge_probability)
                .build(&mut rng),
        };

        let lists = match self.lists {
            Some(l) => {
                l.check_partition(&graph)?;
                l
            }
            None => CompartmentLists::seed(
                &graph,
                self.config.initial_infected_count(),
                self.config.initial_recovered,
                &mut rng,
            ),
        };

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            mean_degree = graph.mean_degree(),
            infected = lists.infected.len(),
            recovered = lists.recovered.len(),
            "initial population ready"
        );

        Ok(Sim::new(self.config, graph, lists, self.propagator, rng))
    }
}
