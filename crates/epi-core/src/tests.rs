//! Unit tests for epi-core primitives.

#[cfg(test)]
mod ids {
    use crate::IndividualId;

    #[test]
    fn index_roundtrip() {
        let id = IndividualId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(IndividualId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_and_next() {
        assert!(IndividualId(0) < IndividualId(1));
        assert_eq!(IndividualId(99).checked_next(), Some(IndividualId(100)));
        assert_eq!(IndividualId(u32::MAX).checked_next(), None);
    }

    #[test]
    fn display() {
        assert_eq!(IndividualId(7).to_string(), "IndividualId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Step, StepWindow};

    #[test]
    fn step_window_is_unit_interval() {
        let w = Step(3).window();
        assert_eq!(w, StepWindow { start: 3.0, end: 4.0 });
        assert!(w.is_valid());
        assert!(w.contains(3.0));
        assert!(w.contains(3.999));
        assert!(!w.contains(4.0));
        assert_eq!(w.duration(), 1.0);
    }

    #[test]
    fn step_arithmetic() {
        assert_eq!(Step(2) + 3, Step(5));
        assert_eq!(Step(5).next(), Step(6));
        assert_eq!(Step(5).to_string(), "step 5");
    }

    #[test]
    fn inverted_window_is_invalid() {
        assert!(!StepWindow { start: 2.0, end: 1.0 }.is_valid());
        assert!(!StepWindow { start: 1.0, end: f64::INFINITY }.is_valid());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        // Out-of-range probabilities are clamped rather than panicking.
        assert!(rng.gen_bool(1.5));
    }

    #[test]
    fn exponential_is_positive_and_zero_rate_never_fires() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            let x = rng.exponential(2.0);
            assert!(x.is_finite() && x >= 0.0);
        }
        assert_eq!(rng.exponential(0.0), f64::INFINITY);
    }

    #[test]
    fn exponential_mean_is_reciprocal_rate() {
        let mut rng = SimRng::new(11);
        let n = 20_000;
        let mean = (0..n).map(|_| rng.exponential(4.0)).sum::<f64>() / n as f64;
        assert!((mean - 0.25).abs() < 0.02, "got {mean}");
    }

    #[test]
    fn take_uniform_drains_without_repeats() {
        let mut rng = SimRng::new(3);
        let mut pool: Vec<u32> = (0..50).collect();
        let mut seen = Vec::new();
        while let Some(x) = rng.take_uniform(&mut pool) {
            seen.push(x);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        assert!(rng.take_uniform(&mut pool).is_none());
    }

    #[test]
    fn sample_is_distinct_and_bounded() {
        let mut rng = SimRng::new(5);
        let items: Vec<u32> = (0..10).collect();
        let mut picked = rng.sample(&items, 4);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 4);
        assert_eq!(rng.sample(&items, 25).len(), 10);
    }
}

#[cfg(test)]
mod compartment {
    use crate::Compartment;

    #[test]
    fn indices_follow_all_order() {
        for (i, c) in Compartment::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Compartment::Infected.to_string(), "I");
    }
}

#[cfg(test)]
mod config {
    use crate::{AdmissionMix, EpiError, InitialInfection, InterventionConfig, RunConfig};

    fn small() -> RunConfig {
        RunConfig {
            population:       100,
            initial_infected: InitialInfection::Count(1),
            max_time:         3,
            ..RunConfig::default()
        }
    }

    #[test]
    fn default_is_valid() {
        RunConfig::default().validate().unwrap();
        assert_eq!(RunConfig::default().initial_infected_count(), 1); // round(0.0003 * 3000)
    }

    #[test]
    fn zero_max_time_rejected() {
        let cfg = RunConfig { max_time: 0, ..small() };
        assert!(matches!(cfg.validate(), Err(EpiError::Config(_))));
    }

    #[test]
    fn negative_rate_rejected() {
        let cfg = RunConfig { transmission_rate: -0.1, ..small() };
        assert!(cfg.validate().is_err());
        let cfg = RunConfig { recovery_rate: f64::NAN, ..small() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn admission_mix_must_sum_to_one() {
        let mut cfg = small();
        cfg.churn.admission = AdmissionMix { susceptible: 0.5, infected: 0.2, recovered: 0.2 };
        assert!(cfg.validate().is_err());
        cfg.churn.admission = AdmissionMix::all_susceptible();
        cfg.validate().unwrap();
    }

    #[test]
    fn probabilities_outside_unit_interval_rejected() {
        assert!(RunConfig { edge_probability: 1.2, ..small() }.validate().is_err());
        assert!(RunConfig { death_rate: -0.01, ..small() }.validate().is_err());
    }

    #[test]
    fn too_many_seeded_individuals_rejected() {
        let cfg = RunConfig {
            initial_infected:  InitialInfection::Count(60),
            initial_recovered: 50,
            ..small()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_reduced_transmission_rejected() {
        let cfg = RunConfig {
            intervention: Some(InterventionConfig {
                reduced_transmission_rate: Some(-1.0),
                ..InterventionConfig::default()
            }),
            ..small()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn fraction_rounds_to_nearest() {
        assert_eq!(InitialInfection::Fraction(0.016).resolve(100), 2);
        assert_eq!(InitialInfection::Fraction(0.0).resolve(100), 0);
        assert_eq!(InitialInfection::Count(3).resolve(100), 3);
    }
}
