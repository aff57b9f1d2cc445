use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Action, Clock, EnvConfig, EnvError, State, TravelTimeOracle};

/// Outcome of applying one action: the next state and where the elapsed hours went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: State,
    /// Idle hours after refusing every request.
    pub wait_time: u32,
    /// Empty driving hours to reach the pickup.
    pub transit_time: u32,
    /// Hours driven with a passenger.
    pub ride_time: u32,
}

impl Transition {
    /// Hours elapsed over the whole step, widened so the sum cannot overflow.
    pub fn total_time(&self) -> u64 {
        u64::from(self.wait_time) + u64::from(self.transit_time) + u64::from(self.ride_time)
    }
}

/// Resolve `action` taken at `state` into the next state.
///
/// Refusing costs one idle hour. A driver already at the pickup drives straight to the drop.
/// Otherwise the driver first relocates, and the ride duration is looked up at the time the
/// driver reaches the pickup. The final clock is always advanced from the original time.
pub fn next_state<O: TravelTimeOracle + ?Sized>(
    config: &EnvConfig,
    state: State,
    action: Action,
    oracle: &O,
) -> Result<Transition, EnvError> {
    if !state.is_within(config) {
        return Err(EnvError::InvalidState { state });
    }
    if !action.is_within(config) {
        return Err(EnvError::InvalidAction { action });
    }

    let clock = Clock::new(config.hours_per_day, config.days_per_week);
    let State {
        location,
        hour,
        day,
    } = state;

    let (next_location, wait_time, transit_time, ride_time) = if action.is_no_ride() {
        trace!(state = %state, "refusing all requests");
        (location, 1, 0, 0)
    } else if location == action.pickup {
        trace!(state = %state, action = %action, "driver already at pickup");
        let ride_time = oracle.travel_time(location, action.drop, hour, day)?;
        (action.drop, 0, 0, ride_time)
    } else {
        trace!(state = %state, action = %action, "driver relocating to pickup");
        let transit_time = oracle.travel_time(location, action.pickup, hour, day)?;
        let (pickup_hour, pickup_day) = clock.advance(hour, day, u64::from(transit_time));
        let ride_time = oracle.travel_time(action.pickup, action.drop, pickup_hour, pickup_day)?;
        (action.drop, 0, transit_time, ride_time)
    };

    let transition = Transition {
        next_state: state,
        wait_time,
        transit_time,
        ride_time,
    };
    let (next_hour, next_day) = clock.advance(hour, day, transition.total_time());

    Ok(Transition {
        next_state: State::new(next_location, next_hour, next_day),
        ..transition
    })
}
