use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcoError>;

#[derive(Error, Debug)]
pub enum AcoError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
    #[error("L{line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unsupported instance: {0}")]
    UnsupportedInstance(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("likelihood scores from location {location} sum to {total}, cannot normalize")]
    DegenerateLikelihood { location: usize, total: f64 },
    #[error("pheromone trail read before initialization")]
    UninitializedTrail,
    #[error("ant still holds a tour, reset it before the next run")]
    TourNotReset,
    #[error("no ant completed a tour")]
    NoSolution,
}

impl AcoError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        AcoError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Errors an ant can hit mid-run without invalidating the colony.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AcoError::DegenerateLikelihood { .. })
    }
}
