mod clock;
mod config;
mod encoding;
mod env;
mod error;
mod io;
mod oracle;
mod requests;
mod reward;
mod space;
mod transition;

#[cfg(test)]
mod tests;

pub use clock::{Clock, update_time_day};
pub use config::EnvConfig;
pub use encoding::{encode_state, encode_state_action};
pub use env::{CabDriverEnv, StepOutcome};
pub use error::EnvError;
pub use io::{load_matrix_json, load_matrix_yaml, save_matrix_json};
pub use oracle::{MatrixShape, NestedHours, TravelTimeMatrix, TravelTimeOracle};
pub use requests::{RequestSource, Requests, generate_requests};
pub use reward::RewardModel;
pub use space::{Action, ActionId, ActionSpace, State, StateSpace};
pub use transition::{Transition, next_state};
