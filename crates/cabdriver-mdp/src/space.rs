use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{EnvConfig, EnvError};

/// Driver position in space and time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub location: usize,
    pub hour: usize,
    pub day: usize,
}

impl State {
    /// Create a state from its three fields.
    pub fn new(location: usize, hour: usize, day: usize) -> Self {
        Self {
            location,
            hour,
            day,
        }
    }

    /// Return whether every field lies within the bounds declared by `config`.
    pub fn is_within(&self, config: &EnvConfig) -> bool {
        self.location < config.locations
            && self.hour < config.hours_per_day
            && self.day < config.days_per_week
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.location, self.hour, self.day)
    }
}

/// A dispatch decision: drive from `pickup` to `drop`, or refuse with [`Action::NO_RIDE`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub pickup: usize,
    pub drop: usize,
}

impl Action {
    /// Refuse every request for this decision epoch.
    pub const NO_RIDE: Action = Action { pickup: 0, drop: 0 };

    /// Ride from `pickup` to `drop`.
    pub fn ride(pickup: usize, drop: usize) -> Self {
        Self { pickup, drop }
    }

    /// Return whether this is the no-ride sentinel.
    pub fn is_no_ride(&self) -> bool {
        *self == Action::NO_RIDE
    }

    /// Return whether this action is the sentinel or a ride between two distinct known locations.
    pub fn is_within(&self, config: &EnvConfig) -> bool {
        self.is_no_ride()
            || (self.pickup != self.drop
                && self.pickup < config.locations
                && self.drop < config.locations)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pickup, self.drop)
    }
}

/// Dense index into an [`ActionSpace`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(usize);

impl ActionId {
    /// Id of the no-ride sentinel, always the first entry of the action space.
    pub const NO_RIDE: ActionId = ActionId(0);

    /// Return the underlying action index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    /// Allow explicit conversion from a raw action index.
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}

/// Ordered action space: the no-ride sentinel followed by every ordered pair of distinct locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpace {
    locations: usize,
    actions: Vec<Action>,
}

impl ActionSpace {
    /// Enumerate the action space for `locations` locations.
    pub fn new(locations: usize) -> Self {
        let mut actions = Vec::with_capacity(1 + locations * locations.saturating_sub(1));
        actions.push(Action::NO_RIDE);
        for pickup in 0..locations {
            for drop in 0..locations {
                if pickup != drop {
                    actions.push(Action::ride(pickup, drop));
                }
            }
        }

        Self { locations, actions }
    }

    /// Number of actions, including the sentinel.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Look up the action stored at `id`.
    pub fn get(&self, id: ActionId) -> Option<Action> {
        self.actions.get(id.index()).copied()
    }

    /// Inverse of [`ActionSpace::get`], computed from the row-major layout.
    pub fn index_of(&self, action: Action) -> Option<ActionId> {
        if action.is_no_ride() {
            return Some(ActionId::NO_RIDE);
        }
        let m = self.locations;
        if action.pickup == action.drop || action.pickup >= m || action.drop >= m {
            return None;
        }

        // Each pickup row holds m-1 rides; the diagonal is skipped.
        let column = if action.drop > action.pickup {
            action.drop - 1
        } else {
            action.drop
        };
        Some(ActionId(1 + action.pickup * (m - 1) + column))
    }

    /// Ids of all ride actions, which excludes the sentinel.
    pub fn ride_ids(&self) -> RangeInclusive<usize> {
        1..=self.actions.len() - 1
    }

    /// Iterate over `(id, action)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, Action)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .map(|(idx, action)| (ActionId(idx), *action))
    }

    /// Borrow the actions in order.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}

/// Ordered state space in location, hour, day nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSpace {
    hours_per_day: usize,
    days_per_week: usize,
    states: Vec<State>,
}

impl StateSpace {
    /// Enumerate every `(location, hour, day)` combination.
    pub fn new(locations: usize, hours_per_day: usize, days_per_week: usize) -> Self {
        let mut states = Vec::with_capacity(locations * hours_per_day * days_per_week);
        for location in 0..locations {
            for hour in 0..hours_per_day {
                for day in 0..days_per_week {
                    states.push(State::new(location, hour, day));
                }
            }
        }

        Self {
            hours_per_day,
            days_per_week,
            states,
        }
    }

    /// Enumerate the state space declared by `config`.
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.locations, config.hours_per_day, config.days_per_week)
    }

    /// Number of states, `m * t * d`.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Look up the state stored at `index`.
    pub fn get(&self, index: usize) -> Option<State> {
        self.states.get(index).copied()
    }

    /// Return the position of `state`, computed from the nesting order.
    pub fn index_of(&self, state: State) -> Result<usize, EnvError> {
        let index = (state.location * self.hours_per_day + state.hour) * self.days_per_week
            + state.day;
        match self.states.get(index) {
            Some(found) if *found == state => Ok(index),
            _ => Err(EnvError::InvalidState { state }),
        }
    }

    /// Iterate over states in order.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.states.iter().copied()
    }

    /// Borrow the states in order.
    pub fn as_slice(&self) -> &[State] {
        &self.states
    }
}
