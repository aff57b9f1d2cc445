use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::EnvError;

const DEFAULT_ENV_CONFIG_YAML: &str = include_str!("../config/env.default.yaml");

/// Static parameters of the dispatch environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Number of locations `m`.
    pub locations: usize,
    /// Number of hours in a day `t`.
    pub hours_per_day: usize,
    /// Number of days in a week `d`.
    pub days_per_week: usize,
    /// Revenue earned per hour with a passenger on board.
    pub revenue_per_hour: f64,
    /// Fuel and other costs per hour of operation.
    pub cost_per_hour: f64,
    /// Poisson mean of ride requests per decision epoch, indexed by location.
    pub request_rates: Vec<f64>,
    /// Upper bound on ride requests offered in one decision epoch.
    pub max_requests: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            locations: 5,
            hours_per_day: 24,
            days_per_week: 7,
            revenue_per_hour: 9.0,
            cost_per_hour: 5.0,
            request_rates: vec![2.0, 12.0, 4.0, 7.0, 8.0],
            max_requests: 15,
        }
    }
}

impl EnvConfig {
    /// Parse an environment config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EnvError> {
        let config: EnvConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an environment config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_ENV_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, EnvError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Number of distinct ride actions, `m(m-1)`.
    pub fn ride_pool_size(&self) -> usize {
        self.locations * self.locations.saturating_sub(1)
    }

    /// Length of the one-hot state encoding, `m + t + d`.
    pub fn state_encoding_len(&self) -> usize {
        self.locations + self.hours_per_day + self.days_per_week
    }

    /// Poisson mean of ride requests at `location`.
    pub fn request_rate(&self, location: usize) -> Result<f64, EnvError> {
        self.request_rates.get(location).copied().ok_or_else(|| {
            EnvError::Configuration(format!("no request rate for location {location}"))
        })
    }

    /// Check bounds and cross-field constraints.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.locations == 0 {
            return Err(EnvError::Configuration(
                "locations must be greater than 0".to_string(),
            ));
        }
        if self.hours_per_day == 0 {
            return Err(EnvError::Configuration(
                "hours_per_day must be greater than 0".to_string(),
            ));
        }
        if self.days_per_week == 0 {
            return Err(EnvError::Configuration(
                "days_per_week must be greater than 0".to_string(),
            ));
        }
        if !self.revenue_per_hour.is_finite() || self.revenue_per_hour < 0.0 {
            return Err(EnvError::Configuration(
                "revenue_per_hour must be finite and >= 0".to_string(),
            ));
        }
        if !self.cost_per_hour.is_finite() || self.cost_per_hour < 0.0 {
            return Err(EnvError::Configuration(
                "cost_per_hour must be finite and >= 0".to_string(),
            ));
        }

        // Every declared location needs exactly one rate.
        if self.request_rates.len() < self.locations {
            return Err(EnvError::Configuration(format!(
                "no request rate for location {}",
                self.request_rates.len()
            )));
        }
        if self.request_rates.len() > self.locations {
            return Err(EnvError::Configuration(format!(
                "{} request rates declared for {} locations",
                self.request_rates.len(),
                self.locations
            )));
        }
        for (location, rate) in self.request_rates.iter().enumerate() {
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(EnvError::Configuration(format!(
                    "request rate for location {location} must be finite and > 0, got {rate}"
                )));
            }
        }

        if self.max_requests > self.ride_pool_size() {
            return Err(EnvError::Configuration(format!(
                "max_requests {} exceeds the {} available ride actions",
                self.max_requests,
                self.ride_pool_size()
            )));
        }

        Ok(())
    }
}
