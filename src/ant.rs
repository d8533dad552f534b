use crate::environment::{Environment, TourRef};
use crate::error::{AcoError, Result};
use crate::sampling::{choose_uniform, choose_weighted};
use rand::Rng;

/// An artificial ant building closed tours with the random proportional rule.
///
/// The ant never stores its environment; it is handed one on every call that
/// needs it. `alpha` weighs the pheromone on an edge, `beta` weighs the
/// inverse of its length.
#[derive(Debug, Clone)]
pub struct Ant<R> {
    alpha: f64,
    beta: f64,
    current_location: usize,
    travelled_distance: f64,
    visited_locations: Vec<usize>,
    complete: bool,
    rng: R,
}

impl<R: Rng> Ant<R> {
    /// Places a new ant on a random location of `environment`.
    pub fn new(alpha: f64, beta: f64, environment: &Environment, mut rng: R) -> Self {
        let current_location = random_location(environment, &mut rng);
        Ant {
            alpha,
            beta,
            current_location,
            travelled_distance: 0.0,
            visited_locations: Vec::with_capacity(environment.dimension()),
            complete: false,
            rng,
        }
    }

    /// Visits every location once and returns home.
    ///
    /// On error the partial tour is left in place and the ant must be reset.
    pub fn run(&mut self, environment: &Environment) -> Result<()> {
        if !environment.is_initialized() {
            return Err(AcoError::UninitializedTrail);
        }
        if !self.visited_locations.is_empty() {
            return Err(AcoError::TourNotReset);
        }

        let initial_location = self.current_location;
        let mut available_locations: Vec<usize> = environment
            .possible_locations()
            .iter()
            .copied()
            .filter(|&location| location != initial_location)
            .collect();
        self.visited_locations.push(initial_location);

        while !available_locations.is_empty() {
            let next_location = self.select_path(environment, &available_locations)?;

            self.travelled_distance += environment.distance(self.current_location, next_location);
            self.current_location = next_location;

            self.visited_locations.push(next_location);
            if let Some(pos) = available_locations.iter().position(|&l| l == next_location) {
                available_locations.remove(pos);
            }
        }

        self.travelled_distance += environment.distance(self.current_location, initial_location);
        self.complete = true;
        Ok(())
    }

    /// Samples the next location among `available_locations`.
    pub fn select_path(
        &mut self,
        environment: &Environment,
        available_locations: &[usize],
    ) -> Result<usize> {
        let current = self.current_location;
        let path_likelihoods: Vec<f64> = available_locations
            .iter()
            .map(|&location| {
                let path_pheromone = environment.pheromone(current, location);
                let path_distance = environment.distance(current, location);
                path_pheromone.powf(self.alpha) * (1.0 / path_distance).powf(self.beta)
            })
            .collect();

        choose_weighted(&mut self.rng, available_locations, &path_likelihoods)
            .copied()
            .ok_or_else(|| AcoError::DegenerateLikelihood {
                location: environment.topology().location(current).id,
                total: path_likelihoods.iter().sum(),
            })
    }

    /// Clears the tour and drops the ant on a fresh random location.
    pub fn reset(&mut self, environment: &Environment) {
        self.travelled_distance = 0.0;
        self.visited_locations.clear();
        self.complete = false;
        self.current_location = random_location(environment, &mut self.rng);
    }

    /// The finished tour, `None` until [`Ant::run`] succeeds.
    pub fn tour(&self) -> Option<TourRef<'_>> {
        self.complete.then(|| TourRef {
            path: &self.visited_locations,
            distance: self.travelled_distance,
        })
    }
}

impl<R> Ant<R> {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_location(&self) -> usize {
        self.current_location
    }

    pub fn travelled_distance(&self) -> f64 {
        self.travelled_distance
    }

    pub fn visited_locations(&self) -> &[usize] {
        &self.visited_locations
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

fn random_location<R: Rng>(environment: &Environment, rng: &mut R) -> usize {
    // Environments hold at least two locations.
    choose_uniform(rng, environment.possible_locations())
        .copied()
        .unwrap_or_default()
}
