//! Ant Colony Optimization for the symmetric travelling salesman problem.
//!
//! A [`Colony`] of [`Ant`]s repeatedly builds closed tours over a
//! [`Topology`], biased by the pheromone trail kept in an [`Environment`].

pub mod ant;
pub mod colony;
pub mod config;
pub mod environment;
pub mod error;
pub mod parser;
pub mod sampling;
pub mod topology;
pub mod utils;

pub use ant::Ant;
pub use colony::{Colony, Solution};
pub use config::{ColonyParams, Config};
pub use environment::{Environment, PheromoneTrail, TourRef};
pub use error::{AcoError, Result};
pub use topology::{Location, Metric, Topology};

use tracing::info;

pub fn run(config: &Config) -> Result<()> {
    let params = config.colony_params()?;
    let topology = parser::parse_tsp_file(&config.file_path)?;
    info!(
        name = topology.name(),
        dimension = topology.dimension(),
        metric = topology.metric().as_str(),
        "loaded instance"
    );

    let name = topology.name().to_string();
    let mut colony = Colony::new(topology, params)?;
    let solution = colony.solve(config.num_iters)?;

    println!("Solution: {:?}", solution.tour);
    println!("Locations visited: {}", solution.tour.len());
    println!("Distance: {}", solution.distance);
    println!("Found at iteration: {}", solution.found_at + 1);
    if solution.failed_runs > 0 {
        println!("Failed ant runs: {}", solution.failed_runs);
    }

    if let Some(solutions_path) = &config.solutions {
        let optima = utils::load_known_optima(solutions_path)?;
        match utils::optimality_gap(&name, solution.distance, &optima) {
            Some((optimal, gap)) => println!("Known optimum: {} (gap {:.2}%)", optimal, gap),
            None => println!("No known optimum for {}", name),
        }
    }

    Ok(())
}
