use thiserror::Error;

use crate::{Action, State};

#[derive(Debug, Error)]
/// Error type for configuration, oracle loading, request generation, and transitions.
pub enum EnvError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid environment config: {0}")]
    Configuration(String),

    #[error(
        "travel time lookup out of bounds: origin {origin}, destination {destination}, hour {hour}, day {day}"
    )]
    OracleLookup {
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
    },

    #[error("cannot sample {requested} distinct requests from a pool of {pool}")]
    Sampling { requested: usize, pool: usize },

    #[error("state {state} is outside the state space")]
    InvalidState { state: State },

    #[error("action {action} is outside the action space")]
    InvalidAction { action: Action },

    #[error(
        "invalid travel time {value} at origin {origin}, destination {destination}, hour {hour}, day {day}"
    )]
    InvalidTravelTime {
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
        value: f64,
    },

    #[error("travel time matrix must have shape {expected:?}, got {found:?}")]
    MatrixShape {
        expected: (usize, usize, usize, usize),
        found: (usize, usize, usize, usize),
    },
}
