//! Unit tests for epi-population.

#[cfg(test)]
mod contact_graph {
    use epi_core::IndividualId;

    use crate::{ContactGraph, PopulationStore};

    fn id(n: u32) -> IndividualId {
        IndividualId(n)
    }

    #[test]
    fn add_and_remove_nodes() {
        let mut g = ContactGraph::new();
        assert!(g.add_node(id(0)));
        assert!(!g.add_node(id(0)), "double insert is rejected");
        assert!(g.add_node(id(5)));
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.max_live_id(), Some(id(5)));
        assert!(g.remove_node(id(5)));
        assert!(!g.remove_node(id(5)));
        assert_eq!(g.max_live_id(), Some(id(0)));
    }

    #[test]
    fn edges_are_undirected_and_counted_once() {
        let mut g = ContactGraph::with_nodes(3);
        assert!(g.add_edge(id(0), id(1)));
        assert!(!g.add_edge(id(1), id(0)), "reverse edge already present");
        assert!(g.has_edge(id(1), id(0)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(id(1)).collect::<Vec<_>>(), vec![id(0)]);
    }

    #[test]
    fn self_loops_and_dangling_edges_rejected() {
        let mut g = ContactGraph::with_nodes(2);
        assert!(!g.add_edge(id(0), id(0)));
        assert!(!g.add_edge(id(0), id(9)));
        assert!(!g.add_edge(id(9), id(0)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn removing_a_node_drops_its_edges() {
        let mut g = ContactGraph::with_nodes(4);
        g.add_edge(id(0), id(1));
        g.add_edge(id(0), id(2));
        g.add_edge(id(2), id(3));
        g.remove_node(id(0));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(id(1)), 0);
        assert!(!g.has_edge(id(2), id(0)));
        assert_eq!(g.neighbors(id(0)).count(), 0);
    }

    #[test]
    fn next_free_id_is_above_max_live() {
        let mut g = ContactGraph::new();
        assert_eq!(g.next_free_id(), Some(id(0)));
        g.add_node(id(3));
        g.add_node(id(10));
        assert_eq!(g.next_free_id(), Some(id(11)));
        g.add_node(IndividualId(u32::MAX));
        assert_eq!(g.next_free_id(), None);
    }
}

#[cfg(test)]
mod builder {
    use epi_core::SimRng;

    use crate::{ContactGraphBuilder, PopulationStore};

    #[test]
    fn zero_probability_has_no_edges() {
        let g = ContactGraphBuilder::new(50).build(&mut SimRng::new(1));
        assert_eq!(g.node_count(), 50);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn unit_probability_is_complete() {
        let g = ContactGraphBuilder::new(10).edge_probability(1.0).build(&mut SimRng::new(1));
        assert_eq!(g.edge_count(), 45);
    }

    #[test]
    fn edge_count_near_expectation() {
        let n = 2_000;
        let p = 0.01;
        let g = ContactGraphBuilder::new(n).edge_probability(p).build(&mut SimRng::new(9));
        let expected = p * (n * (n - 1) / 2) as f64; // 19_990
        let got = g.edge_count() as f64;
        assert!((got - expected).abs() < 0.05 * expected, "got {got}, expected ≈ {expected}");
    }

    #[test]
    fn same_seed_same_graph() {
        let a = ContactGraphBuilder::new(300).edge_probability(0.05).build(&mut SimRng::new(4));
        let b = ContactGraphBuilder::new(300).edge_probability(0.05).build(&mut SimRng::new(4));
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod compartments {
    use epi_core::{Compartment, EpiError, IndividualId, SimRng};

    use crate::{CompartmentLists, ContactGraph};

    fn ids(v: &[u32]) -> Vec<IndividualId> {
        v.iter().copied().map(IndividualId).collect()
    }

    #[test]
    fn susceptible_is_the_complement() {
        let g = ContactGraph::with_nodes(6);
        let lists = CompartmentLists::new(ids(&[1, 4]), ids(&[2]));
        assert_eq!(lists.susceptible(&g), ids(&[0, 3, 5]));
        let counts = lists.counts(&g);
        assert_eq!((counts.susceptible, counts.infected, counts.recovered), (3, 2, 1));
        assert_eq!(counts.total(), 6);
        assert_eq!(lists.compartment_of(IndividualId(2)), Compartment::Recovered);
        assert_eq!(lists.compartment_of(IndividualId(0)), Compartment::Susceptible);
    }

    #[test]
    fn partition_check_catches_overlap_and_dead_ids() {
        let g = ContactGraph::with_nodes(4);
        let overlap = CompartmentLists::new(ids(&[1]), ids(&[1]));
        assert!(matches!(overlap.check_partition(&g), Err(EpiError::DuplicateMembership(_))));
        let dead = CompartmentLists::new(ids(&[7]), vec![]);
        assert!(matches!(dead.check_partition(&g), Err(EpiError::UnknownIndividual(_))));
        CompartmentLists::new(ids(&[0]), ids(&[3])).check_partition(&g).unwrap();
    }

    #[test]
    fn seeding_picks_distinct_live_individuals() {
        let g = ContactGraph::with_nodes(20);
        let lists = CompartmentLists::seed(&g, 3, 2, &mut SimRng::new(8));
        assert_eq!(lists.infected.len(), 3);
        assert_eq!(lists.recovered.len(), 2);
        lists.check_partition(&g).unwrap();
    }
}

#[cfg(test)]
mod churn {
    use epi_core::{AdmissionMix, Compartment, IndividualId, SimRng};

    use crate::{
        ChurnEngine, ChurnError, ChurnOrder, CompartmentLists, ContactGraph, ContactGraphBuilder,
        PopulationStore,
    };

    fn ids(v: impl IntoIterator<Item = u32>) -> Vec<IndividualId> {
        v.into_iter().map(IndividualId).collect()
    }

    fn engine(death_rate: f64) -> ChurnEngine {
        ChurnEngine::new(0.1, AdmissionMix::all_susceptible(), death_rate)
    }

    #[test]
    fn alive_recovered_floors() {
        let e = engine(0.25);
        assert_eq!(e.alive_recovered(10), 7); // floor(7.5)
        assert_eq!(engine(0.0).alive_recovered(10), 10);
        assert_eq!(engine(1.0).alive_recovered(10), 0);
    }

    #[test]
    fn release_more_than_population_fails_without_mutation() {
        let mut rng = SimRng::new(1);
        let mut g = ContactGraphBuilder::new(30).edge_probability(0.2).build(&mut rng);
        let lists = CompartmentLists::new(ids(0..5), ids(5..10));
        let before_graph = g.clone();

        let err = engine(0.0).release(&mut g, lists, 31, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ChurnError::PopulationExhausted { requested: 31, releasable: 30 }
        ));
        assert_eq!(g, before_graph, "no partial mutation");
    }

    #[test]
    fn presumed_dead_recovered_are_not_releasable() {
        let mut rng = SimRng::new(2);
        let mut g = ContactGraph::with_nodes(10);
        // 10 recovered, half presumed dead → only 5 releasable.
        let lists = CompartmentLists::new(vec![], ids(0..10));
        let e = engine(0.5);
        assert_eq!(e.releasable(&g, &lists), 5);
        assert!(e.release(&mut g, lists.clone(), 6, &mut rng).is_err());
        let out = e.release(&mut g, lists, 5, &mut rng).unwrap();
        assert_eq!(out.counts.recovered, 5);
        assert_eq!(out.lists.recovered.len(), 5);
    }

    #[test]
    fn release_everyone_empties_graph_and_lists() {
        let mut rng = SimRng::new(3);
        let mut g = ContactGraphBuilder::new(12).edge_probability(0.5).build(&mut rng);
        let lists = CompartmentLists::new(ids(0..4), ids(4..6));
        let out = engine(0.0).release(&mut g, lists, 12, &mut rng).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(out.lists.infected.is_empty() && out.lists.recovered.is_empty());
        assert_eq!(out.counts.susceptible, 6);
        assert_eq!(out.counts.infected, 4);
        assert_eq!(out.counts.recovered, 2);
    }

    #[test]
    fn release_counts_match_removed_members() {
        let mut rng = SimRng::new(4);
        let mut g = ContactGraphBuilder::new(200).edge_probability(0.05).build(&mut rng);
        let lists = CompartmentLists::new(ids(0..40), ids(40..80));
        let out = engine(0.0).release(&mut g, lists, 50, &mut rng).unwrap();

        assert_eq!(out.released.len(), 50);
        assert_eq!(out.counts.total(), 50);
        assert_eq!(g.node_count(), 150);
        assert_eq!(out.lists.infected.len(), 40 - out.counts.infected);
        assert_eq!(out.lists.recovered.len(), 40 - out.counts.recovered);
        for id in &out.released {
            assert!(!g.contains(*id));
        }
        out.lists.check_partition(&g).unwrap();
    }

    #[test]
    fn zero_release_on_empty_population_is_fine() {
        let mut g = ContactGraph::new();
        let out = engine(0.0)
            .release(&mut g, CompartmentLists::default(), 0, &mut SimRng::new(5))
            .unwrap();
        assert!(out.released.is_empty());
    }

    #[test]
    fn release_is_roughly_proportional() {
        // 50% S, 25% I, 25% R; draw 10% of the population many times.
        let e = engine(0.0);
        let mut totals = [0usize; 3];
        for seed in 0..200 {
            let mut rng = SimRng::new(seed);
            let mut g = ContactGraph::with_nodes(400);
            let lists = CompartmentLists::new(ids(0..100), ids(100..200));
            let out = e.release(&mut g, lists, 40, &mut rng).unwrap();
            for c in Compartment::ALL {
                totals[c.index()] += out.counts.get(c);
            }
        }
        let all = (200 * 40) as f64;
        assert!((totals[0] as f64 / all - 0.5).abs() < 0.03, "{totals:?}");
        assert!((totals[1] as f64 / all - 0.25).abs() < 0.03, "{totals:?}");
        assert!((totals[2] as f64 / all - 0.25).abs() < 0.03, "{totals:?}");
    }

    #[test]
    fn admissions_get_fresh_ids_above_max() {
        let mut rng = SimRng::new(6);
        let mut g = ContactGraph::with_nodes(10);
        g.remove_node(IndividualId(3));
        let out = engine(0.0).admit(&mut g, CompartmentLists::default(), 3, &mut rng).unwrap();
        assert_eq!(out.admitted, ids(10..13));
        assert_eq!(g.node_count(), 12);
    }

    #[test]
    fn releasing_the_max_id_lets_admission_reuse_its_slot() {
        let mut rng = SimRng::new(7);
        let mut g = ContactGraph::with_nodes(5);
        g.remove_node(IndividualId(4));
        let out = engine(0.0).admit(&mut g, CompartmentLists::default(), 1, &mut rng).unwrap();
        // 4 is not live any more, so handing it out again collides with no one.
        assert_eq!(out.admitted, ids([4]));
    }

    #[test]
    fn admission_past_the_id_range_fails_without_mutation() {
        let mut rng = SimRng::new(11);
        let mut g = ContactGraph::new();
        g.add_node(IndividualId(u32::MAX - 1));
        let before = g.clone();

        let err = engine(0.0).admit(&mut g, CompartmentLists::default(), 2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ChurnError::IdsExhausted { requested: 2, max_live: IndividualId(m) } if m == u32::MAX - 1
        ));
        assert_eq!(g, before);

        let out = engine(0.0).admit(&mut g, CompartmentLists::default(), 1, &mut rng).unwrap();
        assert_eq!(out.admitted, ids([u32::MAX]));
    }

    #[test]
    fn churn_step_checks_id_headroom_before_releasing() {
        let mut rng = SimRng::new(12);
        let mut g = ContactGraph::with_nodes(3);
        g.add_node(IndividualId(u32::MAX));
        let before = g.clone();
        let lists = CompartmentLists::default();

        let err = engine(0.0)
            .apply(&mut g, lists, ChurnOrder { births: 1, releases: 2 }, &mut rng)
            .unwrap_err();
        assert!(matches!(err, ChurnError::IdsExhausted { requested: 1, .. }));
        assert_eq!(g, before);
    }

    #[test]
    fn admission_mix_routes_to_lists() {
        let mut rng = SimRng::new(8);
        let mut g = ContactGraph::with_nodes(5);
        let all_recovered = ChurnEngine::new(0.0, AdmissionMix::from_infected_recovered(0.0, 1.0), 0.0);
        let out = all_recovered.admit(&mut g, CompartmentLists::default(), 4, &mut rng).unwrap();
        assert_eq!(out.counts.recovered, 4);
        assert_eq!(out.lists.recovered, ids(5..9));

        let all_infected = ChurnEngine::new(0.0, AdmissionMix::from_infected_recovered(1.0, 0.0), 0.0);
        let out = all_infected.admit(&mut g, out.lists, 2, &mut rng).unwrap();
        assert_eq!(out.counts.infected, 2);
        assert_eq!(out.lists.infected, ids(9..11));
    }

    #[test]
    fn admission_contacts_follow_edge_probability() {
        let mut rng = SimRng::new(9);
        let mut g = ContactGraph::with_nodes(100);
        let connect_all = ChurnEngine::new(1.0, AdmissionMix::all_susceptible(), 0.0);
        let out = connect_all.admit(&mut g, CompartmentLists::default(), 1, &mut rng).unwrap();
        assert_eq!(g.degree(out.admitted[0]), 100);

        let isolate = ChurnEngine::new(0.0, AdmissionMix::all_susceptible(), 0.0);
        let out = isolate.admit(&mut g, CompartmentLists::default(), 1, &mut rng).unwrap();
        assert_eq!(g.degree(out.admitted[0]), 0);
        assert!(!g.has_edge(out.admitted[0], out.admitted[0]));
    }

    #[test]
    fn delta_recovered_is_admitted_minus_released() {
        let mut rng = SimRng::new(10);
        let mut g = ContactGraph::with_nodes(10);
        // Everyone is recovered, so every release is a recovered release.
        let lists = CompartmentLists::new(vec![], ids(0..10));
        let e = ChurnEngine::new(0.0, AdmissionMix::from_infected_recovered(0.0, 1.0), 0.0);
        let out = e
            .apply(&mut g, lists, ChurnOrder { births: 2, releases: 5 }, &mut rng)
            .unwrap();
        assert_eq!(out.released.recovered, 5);
        assert_eq!(out.admitted.recovered, 2);
        assert_eq!(out.delta_recovered, -3);
        assert_eq!(out.lists.recovered.len(), 7);
        assert_eq!(g.node_count(), 7);
    }
}

#[cfg(test)]
mod properties {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use epi_core::{AdmissionMix, SimRng};

    use crate::{
        ChurnEngine, ChurnOrder, CompartmentLists, ContactGraphBuilder, PopulationStore,
    };

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn churn_preserves_partition_and_id_uniqueness(
            seed in any::<u64>(),
            population in 5usize..80,
            births in 0usize..15,
            releases in 0usize..15,
            steps in 1usize..6,
            death_rate in 0.0f64..0.5,
        ) {
            let mut rng = SimRng::new(seed);
            let mut g = ContactGraphBuilder::new(population).edge_probability(0.1).build(&mut rng);
            let mut lists = CompartmentLists::seed(&g, population / 5, population / 5, &mut rng);
            let engine = ChurnEngine::new(
                0.1,
                AdmissionMix::from_infected_recovered(0.2, 0.2),
                death_rate,
            );

            for _ in 0..steps {
                let before: BTreeSet<_> = g.nodes().collect();
                let releasable = engine.releasable(&g, &lists);
                let order = ChurnOrder { births, releases };
                match engine.apply(&mut g, lists.clone(), order, &mut rng) {
                    Ok(out) => {
                        lists = out.lists;
                        prop_assert_eq!(out.released.total(), releases);
                        prop_assert_eq!(out.admitted.total(), births);
                        prop_assert_eq!(g.node_count(), before.len() - releases + births);
                    }
                    Err(_) => {
                        prop_assert!(releases > releasable);
                        let after: BTreeSet<_> = g.nodes().collect();
                        prop_assert_eq!(&before, &after);
                        break;
                    }
                }
                lists.check_partition(&g).unwrap();
                let counts = lists.counts(&g);
                prop_assert_eq!(counts.total(), g.node_count());

                // Fresh ids never collide with anyone live before the step.
                for id in g.nodes().filter(|id| !before.contains(id)) {
                    prop_assert!(before.iter().all(|b| *b < id));
                }
            }
        }
    }
}
