use crate::error::{AcoError, Result};
use crate::topology::Topology;
use rayon::prelude::*;
use tracing::debug;

/// Trail value every edge starts with (Dorigo & Stützle, Ant Colony Optimization, p. 13).
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Dense symmetric pheromone matrix stored as one row-major buffer.
#[derive(Debug, Clone, Default)]
pub struct PheromoneTrail {
    dimension: usize,
    values: Vec<f64>,
}

impl PheromoneTrail {
    pub fn new(dimension: usize, initial_value: f64) -> Self {
        PheromoneTrail {
            dimension,
            values: vec![initial_value; dimension * dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dimension + j]
    }

    pub fn evaporate(&mut self, rho: f64) {
        let retained = 1.0 - rho;
        self.values.par_iter_mut().for_each(|value| *value *= retained);
    }

    /// Adds `amount` to both directions of every edge of the closed `path`.
    pub fn reinforce(&mut self, path: &[usize], amount: f64) {
        let n = path.len();
        for k in 0..n {
            let city1_idx = path[k];
            // Handles wrap-around for the last edge
            let city2_idx = path[(k + 1) % n];
            self.values[city1_idx * self.dimension + city2_idx] += amount;
            self.values[city2_idx * self.dimension + city1_idx] += amount;
        }
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dimension)
            .all(|i| ((i + 1)..self.dimension).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// A completed closed tour handed to the trail for reinforcement.
#[derive(Debug, Clone, Copy)]
pub struct TourRef<'a> {
    pub path: &'a [usize],
    pub distance: f64,
}

/// Shared world of the colony: the static topology and the pheromone trail.
///
/// Ants only read through [`Environment::pheromone`] and
/// [`Environment::distance`]; every write goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct Environment {
    topology: Topology,
    trail: PheromoneTrail,
    rho: f64,
    locations: Vec<usize>,
}

impl Environment {
    pub fn new(topology: Topology, rho: f64) -> Result<Self> {
        if !rho.is_finite() || !(0.0..=1.0).contains(&rho) {
            return Err(AcoError::invalid_parameter(
                "rho",
                format!("evaporation rate must lie in [0, 1], got {}", rho),
            ));
        }
        let locations = (0..topology.dimension()).collect();
        Ok(Environment {
            topology,
            trail: PheromoneTrail::default(),
            rho,
            locations,
        })
    }

    /// Lays a uniform trail over every edge, discarding any previous one.
    ///
    /// `ant_population` does not change the initial value yet.
    pub fn initialize(&mut self, ant_population: usize) {
        debug!(
            dimension = self.dimension(),
            ant_population,
            "initializing pheromone trail to {}",
            INITIAL_PHEROMONE
        );
        self.trail = PheromoneTrail::new(self.dimension(), INITIAL_PHEROMONE);
    }

    pub fn is_initialized(&self) -> bool {
        !self.trail.is_empty()
    }

    pub fn evaporate(&mut self) {
        self.trail.evaporate(self.rho);
    }

    pub fn deposit<'a>(&mut self, tours: impl IntoIterator<Item = TourRef<'a>>) {
        for tour in tours {
            debug_assert!(tour.distance > 0.0, "deposit from a zero-length tour");
            let deposited_pheromone = 1.0 / tour.distance;
            self.trail.reinforce(tour.path, deposited_pheromone);
        }
    }

    /// Evaporation followed by deposit, as one step.
    pub fn update<'a>(&mut self, tours: impl IntoIterator<Item = TourRef<'a>>) {
        self.evaporate();
        self.deposit(tours);
    }

    pub fn possible_locations(&self) -> &[usize] {
        &self.locations
    }

    pub fn pheromone(&self, from_idx: usize, to_idx: usize) -> f64 {
        self.trail.get(from_idx, to_idx)
    }

    pub fn distance(&self, from_idx: usize, to_idx: usize) -> f64 {
        self.topology.distance(from_idx, to_idx)
    }

    pub fn trail(&self) -> &PheromoneTrail {
        &self.trail
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn dimension(&self) -> usize {
        self.topology.dimension()
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }
}
