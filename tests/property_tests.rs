//! Property-based tests over random topologies and seeds.

use aco_tsp::{Ant, Colony, ColonyParams, Environment, Metric, Topology};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Coordinates on a coarse lattice so no two locations coincide after dedup.
fn random_coords() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::hash_set((0u32..60, 0u32..60), 2..16).prop_map(|points| {
        points
            .into_iter()
            .map(|(x, y)| (f64::from(x) * 10.0, f64::from(y) * 10.0))
            .collect()
    })
}

fn random_topology() -> impl Strategy<Value = Topology> {
    random_coords()
        .prop_map(|coords| Topology::from_coords("random", Metric::Att, &coords).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ant_tour_is_a_permutation(topology in random_topology(), seed in any::<u64>()) {
        let n = topology.dimension();
        let mut env = Environment::new(topology, 0.5).unwrap();
        env.initialize(1);

        let mut ant = Ant::new(1.0, 2.0, &env, ChaCha8Rng::seed_from_u64(seed));
        ant.run(&env).unwrap();
        let tour = ant.tour().unwrap();

        let mut sorted = tour.path.to_vec();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        prop_assert_eq!(tour.distance, env.topology().tour_length(tour.path));
    }

    #[test]
    fn prop_update_keeps_trail_symmetric_and_non_negative(
        topology in random_topology(),
        seed in any::<u64>(),
        rho in 0.0..1.0f64,
    ) {
        let mut env = Environment::new(topology, rho).unwrap();
        env.initialize(4);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut ants: Vec<_> = (0..4)
            .map(|_| Ant::new(1.0, 2.0, &env, ChaCha8Rng::from_rng(&mut rng)))
            .collect();
        for _ in 0..3 {
            for ant in &mut ants {
                ant.run(&env).unwrap();
            }
            env.update(ants.iter().filter_map(|ant| ant.tour()));
            for ant in &mut ants {
                ant.reset(&env);
            }
        }

        let n = env.dimension();
        prop_assert!(env.trail().is_symmetric());
        for i in 0..n {
            for j in 0..n {
                let value = env.pheromone(i, j);
                prop_assert!(value.is_finite() && value >= 0.0);
            }
        }
    }

    #[test]
    fn prop_evaporation_is_exact(topology in random_topology(), rho in 0.0..1.0f64) {
        let mut env = Environment::new(topology, rho).unwrap();
        env.initialize(1);
        let n = env.dimension();
        let path: Vec<usize> = (0..n).collect();
        env.deposit([aco_tsp::TourRef {
            path: &path,
            distance: 37.0,
        }]);

        let before: Vec<f64> = (0..n * n).map(|k| env.pheromone(k / n, k % n)).collect();
        env.evaporate();
        for k in 0..n * n {
            prop_assert_eq!(env.pheromone(k / n, k % n), before[k] * (1.0 - rho));
        }
    }

    #[test]
    fn prop_colony_solution_is_consistent(topology in random_topology(), seed in any::<u64>()) {
        let n = topology.dimension();
        let params = ColonyParams {
            ant_population: 4,
            seed: Some(seed),
            ..ColonyParams::default()
        };
        let mut colony = Colony::new(topology.clone(), params).unwrap();
        let solution = colony.solve(5).unwrap();

        let mut ids = solution.tour.clone();
        ids.sort_unstable();
        prop_assert_eq!(ids, (1..=n).collect::<Vec<_>>());

        let path: Vec<usize> = solution.tour.iter().map(|id| id - 1).collect();
        prop_assert_eq!(topology.tour_length(&path), solution.distance);

        for window in solution.history.windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
    }
}
