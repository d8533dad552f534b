use crate::ant::Ant;
use crate::config::ColonyParams;
use crate::environment::Environment;
use crate::error::{AcoError, Result};
use crate::topology::Topology;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Best tour found by a colony run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Location ids (1-based) in visiting order, implicitly closed.
    pub tour: Vec<usize>,
    pub distance: f64,
    /// Best-so-far distance after each iteration.
    pub history: Vec<f64>,
    /// Iteration (0-based) that produced `tour`.
    pub found_at: usize,
    /// Ant activations dropped because their likelihoods could not be normalized.
    pub failed_runs: usize,
}

pub struct Colony {
    environment: Environment,
    ants: Vec<Ant<ChaCha8Rng>>,
    params: ColonyParams,
}

impl Colony {
    pub fn new(topology: Topology, params: ColonyParams) -> Result<Self> {
        params.validate()?;
        let environment = Environment::new(topology, params.rho)?;

        let mut master_rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let ants = (0..params.ant_population)
            .map(|_| {
                let rng = ChaCha8Rng::from_rng(&mut master_rng);
                Ant::new(params.alpha, params.beta, &environment, rng)
            })
            .collect();

        Ok(Colony {
            environment,
            ants,
            params,
        })
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn ants(&self) -> &[Ant<ChaCha8Rng>] {
        &self.ants
    }

    pub fn params(&self) -> &ColonyParams {
        &self.params
    }

    /// Runs `iterations` rounds of construct, evaluate, reinforce and reset.
    ///
    /// Ants whose likelihoods cannot be normalized are left out of that
    /// iteration's best scan and deposit; they are counted in
    /// [`Solution::failed_runs`]. Any other ant error aborts the run.
    pub fn solve(&mut self, iterations: usize) -> Result<Solution> {
        info!(
            instance = self.environment.topology().name(),
            dimension = self.environment.dimension(),
            ants = self.ants.len(),
            iterations,
            alpha = self.params.alpha,
            beta = self.params.beta,
            rho = self.params.rho,
            "starting ant colony"
        );

        self.environment.initialize(self.params.ant_population);
        // Ants may still hold tours from a previous solve.
        for ant in &mut self.ants {
            ant.reset(&self.environment);
        }

        let mut best_path: Vec<usize> = Vec::new();
        let mut shortest_distance = f64::INFINITY;
        let mut found_at = 0;
        let mut failed_runs = 0;
        let mut history = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            let outcomes = self.construct_tours();

            let mut iteration_best = f64::INFINITY;
            for (ant_idx, outcome) in outcomes.into_iter().enumerate() {
                match outcome {
                    Ok(()) => {}
                    Err(e) if e.is_recoverable() => {
                        warn!(iteration, ant = ant_idx, "dropping ant tour: {}", e);
                        failed_runs += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            for tour in self.ants.iter().filter_map(|ant| ant.tour()) {
                iteration_best = iteration_best.min(tour.distance);
                if tour.distance < shortest_distance {
                    shortest_distance = tour.distance;
                    best_path = tour.path.to_vec();
                    found_at = iteration;
                }
            }

            // Failed ants hold no tour and deposit nothing.
            self.environment.update(self.ants.iter().filter_map(|ant| ant.tour()));

            for ant in &mut self.ants {
                ant.reset(&self.environment);
            }

            history.push(shortest_distance);
            debug!(iteration, iteration_best, best = shortest_distance, "iteration finished");
        }

        if best_path.is_empty() {
            return Err(AcoError::NoSolution);
        }

        let topology = self.environment.topology();
        let tour = best_path
            .iter()
            .map(|&idx| topology.location(idx).id)
            .collect();

        info!(distance = shortest_distance, found_at, failed_runs, "ant colony finished");

        Ok(Solution {
            tour,
            distance: shortest_distance,
            history,
            found_at,
            failed_runs,
        })
    }

    fn construct_tours(&mut self) -> Vec<Result<()>> {
        let environment = &self.environment;
        if self.params.parallel {
            self.ants
                .par_iter_mut()
                .map(|ant| ant.run(environment))
                .collect()
        } else {
            self.ants.iter_mut().map(|ant| ant.run(environment)).collect()
        }
    }
}
