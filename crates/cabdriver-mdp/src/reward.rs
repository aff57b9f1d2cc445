use serde::{Deserialize, Serialize};

use crate::{EnvConfig, Transition};

/// Linear revenue-minus-cost reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    pub revenue_per_hour: f64,
    pub cost_per_hour: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        RewardModel {
            revenue_per_hour: 9.0,
            cost_per_hour: 5.0,
        }
    }
}

impl RewardModel {
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            revenue_per_hour: config.revenue_per_hour,
            cost_per_hour: config.cost_per_hour,
        }
    }

    /// Revenue for passenger hours minus cost for every hour spent.
    pub fn reward(&self, wait_time: f64, transit_time: f64, ride_time: f64) -> f64 {
        self.revenue_per_hour * ride_time
            - self.cost_per_hour * (ride_time + wait_time + transit_time)
    }

    pub fn reward_for(&self, transition: &Transition) -> f64 {
        self.reward(
            f64::from(transition.wait_time),
            f64::from(transition.transit_time),
            f64::from(transition.ride_time),
        )
    }
}
