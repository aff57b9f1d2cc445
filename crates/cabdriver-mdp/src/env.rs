use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    Action, ActionSpace, EnvConfig, EnvError, RequestSource, Requests, RewardModel, State,
    StateSpace, Transition, TravelTimeOracle, encoding, requests, transition,
};

/// Result of one decision epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub reward: f64,
    pub next_state: State,
    pub total_time: u64,
}

#[derive(Debug, Clone)]
/// Seeded single-driver dispatch environment.
pub struct CabDriverEnv {
    config: EnvConfig,
    action_space: ActionSpace,
    state_space: StateSpace,
    reward_model: RewardModel,
    initial_state: State,
    current_state: State,
    rng: ChaCha8Rng,
}

impl CabDriverEnv {
    /// Validate `config`, build both spaces, and draw a random initial state.
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;

        let action_space = ActionSpace::new(config.locations);
        let state_space = StateSpace::from_config(&config);
        let reward_model = RewardModel::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let initial_index = rng.gen_range(0..state_space.len());
        let initial_state = state_space
            .get(initial_index)
            .ok_or_else(|| EnvError::Configuration("state space is empty".to_string()))?;

        debug!(
            actions = action_space.len(),
            states = state_space.len(),
            initial_state = %initial_state,
            "created cab driver environment"
        );

        Ok(Self {
            config,
            action_space,
            state_space,
            reward_model,
            initial_state,
            current_state: initial_state,
            rng,
        })
    }

    /// Environment with the bundled default configuration.
    pub fn with_default_config(seed: u64) -> Result<Self, EnvError> {
        Self::new(EnvConfig::from_default_yaml()?, seed)
    }

    /// Borrow the validated configuration.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Borrow the ordered action space.
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    /// Borrow the ordered state space.
    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    /// Borrow the reward model built from the config.
    pub fn reward_model(&self) -> &RewardModel {
        &self.reward_model
    }

    /// Rewind the current state to the initial state and return both spaces with it.
    pub fn reset(&mut self) -> (&ActionSpace, &StateSpace, State) {
        self.current_state = self.initial_state;
        (&self.action_space, &self.state_space, self.initial_state)
    }

    /// Return the state a harness last moved the driver to.
    pub fn current_state(&self) -> State {
        self.current_state
    }

    /// Move the driver to `state`, which must belong to the state space.
    pub fn set_current_state(&mut self, state: State) -> Result<(), EnvError> {
        self.state_space.index_of(state)?;
        self.current_state = state;
        Ok(())
    }

    /// Draw the requests offered at `state` from the environment's own RNG.
    pub fn requests(&mut self, state: State) -> Result<Requests, EnvError> {
        requests::generate_requests(&self.config, &self.action_space, state, &mut self.rng)
    }

    /// Draw the requests offered at `state` from an external random source.
    pub fn requests_with<S: RequestSource + ?Sized>(
        &self,
        state: State,
        source: &mut S,
    ) -> Result<Requests, EnvError> {
        requests::generate_requests(&self.config, &self.action_space, state, source)
    }

    /// Resolve `action` at `state` without scoring it.
    pub fn next_state<O: TravelTimeOracle + ?Sized>(
        &self,
        state: State,
        action: Action,
        oracle: &O,
    ) -> Result<Transition, EnvError> {
        transition::next_state(&self.config, state, action, oracle)
    }

    /// Score a timing breakdown with the configured revenue and cost rates.
    pub fn reward(&self, wait_time: f64, transit_time: f64, ride_time: f64) -> f64 {
        self.reward_model.reward(wait_time, transit_time, ride_time)
    }

    /// Apply `action` at `state` and score the transition.
    pub fn step<O: TravelTimeOracle + ?Sized>(
        &self,
        state: State,
        action: Action,
        oracle: &O,
    ) -> Result<StepOutcome, EnvError> {
        let transition = self.next_state(state, action, oracle)?;
        let reward = self.reward_model.reward_for(&transition);

        debug!(
            state = %state,
            action = %action,
            next_state = %transition.next_state,
            reward,
            "stepped"
        );

        Ok(StepOutcome {
            reward,
            next_state: transition.next_state,
            total_time: transition.total_time(),
        })
    }

    /// One-hot encode `state` for the policy network.
    pub fn encode_state(&self, state: State) -> Result<Vec<f32>, EnvError> {
        encoding::encode_state(&self.config, state)
    }

    /// One-hot encode a state-action pair for the policy network.
    pub fn encode_state_action(&self, state: State, action: Action) -> Result<Vec<f32>, EnvError> {
        encoding::encode_state_action(&self.config, state, action)
    }
}
