use crate::error::{AcoError, Result};
use clap::Parser;

/// Parameters of one colony run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonyParams {
    pub ant_population: usize,
    pub alpha: f64, // Pheromone influence
    pub beta: f64,  // Heuristic influence
    pub rho: f64,   // Evaporation rate
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for ColonyParams {
    fn default() -> Self {
        ColonyParams {
            ant_population: 20,
            alpha: 1.0,
            beta: 3.5,
            rho: 0.5,
            seed: None,
            parallel: true,
        }
    }
}

impl ColonyParams {
    pub fn validate(&self) -> Result<()> {
        if self.ant_population == 0 {
            return Err(AcoError::invalid_parameter(
                "ant_population",
                "the colony needs at least one ant",
            ));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AcoError::invalid_parameter(
                    name,
                    format!("exponent must be finite and non-negative, got {}", value),
                ));
            }
        }
        if !self.rho.is_finite() || !(0.0..=1.0).contains(&self.rho) {
            return Err(AcoError::invalid_parameter(
                "rho",
                format!("evaporation rate must lie in [0, 1], got {}", self.rho),
            ));
        }
        Ok(())
    }
}

/// Command line of the solver binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "aco-tsp")]
#[command(about = "Approximate symmetric TSP tours with an ant colony", long_about = None)]
pub struct Config {
    /// TSPLIB instance (.tsp)
    pub file_path: String,

    /// Number of ants
    #[arg(short = 'n', long = "ants", default_value_t = 20)]
    pub num_ants: usize,

    /// Number of iterations
    #[arg(short = 'i', long = "iters", default_value_t = 20)]
    pub num_iters: usize,

    /// Pheromone influence
    #[arg(short, long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Heuristic (inverse distance) influence
    #[arg(short, long, default_value_t = 3.5)]
    pub beta: f64,

    /// Pheromone evaporation rate, in [0, 1]
    #[arg(short = 'e', long = "evap-rate", visible_alias = "rho", default_value_t = 0.5)]
    pub evap_rate: f64,

    /// Seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Construct tours on one thread
    #[arg(long)]
    pub sequential: bool,

    /// File of known optimal lengths (`name : length` per line)
    #[arg(long)]
    pub solutions: Option<String>,

    /// Log per-iteration progress
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn build(
        args: impl IntoIterator<Item = String>,
    ) -> std::result::Result<Config, clap::Error> {
        Config::try_parse_from(args)
    }

    pub fn colony_params(&self) -> Result<ColonyParams> {
        if self.num_iters == 0 {
            return Err(AcoError::invalid_parameter(
                "iters",
                "at least one iteration is required",
            ));
        }
        let params = ColonyParams {
            ant_population: self.num_ants,
            alpha: self.alpha,
            beta: self.beta,
            rho: self.evap_rate,
            seed: self.seed,
            parallel: !self.sequential,
        };
        params.validate()?;
        Ok(params)
    }
}
