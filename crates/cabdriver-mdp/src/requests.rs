use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};
use tracing::debug;

use crate::{Action, ActionId, ActionSpace, EnvConfig, EnvError, State};

/// Randomness needed to generate ride requests.
///
/// Implementations own their state; callers hold them exclusively for the duration of a draw.
pub trait RequestSource {
    /// Draw a request count from a Poisson distribution with the given mean.
    fn poisson(&mut self, mean: f64) -> Result<usize, EnvError>;

    /// Draw `amount` distinct values uniformly from `0..pool`.
    fn sample_distinct(&mut self, pool: usize, amount: usize) -> Result<Vec<usize>, EnvError>;
}

impl RequestSource for ChaCha8Rng {
    fn poisson(&mut self, mean: f64) -> Result<usize, EnvError> {
        let dist = Poisson::new(mean).map_err(|err| {
            EnvError::Configuration(format!("invalid Poisson mean {mean}: {err}"))
        })?;
        let draw: f64 = dist.sample(self);
        Ok(draw as usize)
    }

    fn sample_distinct(&mut self, pool: usize, amount: usize) -> Result<Vec<usize>, EnvError> {
        if amount > pool {
            return Err(EnvError::Sampling {
                requested: amount,
                pool,
            });
        }
        Ok(index::sample(self, pool, amount).into_vec())
    }
}

/// Feasible actions for one decision epoch.
///
/// `ids[i]` indexes `actions[i]` in the action space. The no-ride sentinel is always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requests {
    pub ids: Vec<ActionId>,
    pub actions: Vec<Action>,
}

impl Requests {
    /// Number of ride requests, excluding the sentinel.
    pub fn ride_count(&self) -> usize {
        self.actions.len().saturating_sub(1)
    }

    /// Number of feasible actions, including the sentinel.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over `(id, action)` pairs with the sentinel last.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, Action)> + '_ {
        self.ids.iter().copied().zip(self.actions.iter().copied())
    }
}

/// Draw the ride requests offered to a driver at `state`.
pub fn generate_requests<S: RequestSource + ?Sized>(
    config: &EnvConfig,
    action_space: &ActionSpace,
    state: State,
    source: &mut S,
) -> Result<Requests, EnvError> {
    if !state.is_within(config) {
        return Err(EnvError::InvalidState { state });
    }

    let mean = config.request_rate(state.location)?;
    let drawn = source.poisson(mean)?;
    let count = drawn.min(config.max_requests);

    let rides = action_space.ride_ids();
    let first_ride = *rides.start();
    let pool = rides.count();
    let sampled = source.sample_distinct(pool, count)?;

    let mut ride_ids = Vec::with_capacity(count);
    let mut ride_actions = Vec::with_capacity(count);
    for offset in sampled {
        let id = ActionId::from(first_ride + offset);
        let action = action_space.get(id).ok_or(EnvError::Sampling {
            requested: count,
            pool,
        })?;
        ride_ids.push(id);
        ride_actions.push(action);
    }

    debug!(
        state = %state,
        mean,
        drawn,
        offered = count,
        "generated ride requests"
    );

    let ids = ride_ids
        .into_iter()
        .chain(std::iter::once(ActionId::NO_RIDE))
        .collect();
    let actions = ride_actions
        .into_iter()
        .chain(std::iter::once(Action::NO_RIDE))
        .collect();

    Ok(Requests { ids, actions })
}
