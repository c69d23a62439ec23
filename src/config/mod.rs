//! Environment-based configuration.

use std::env;
use std::str::FromStr;

use crate::signals::engine::BoxParams;

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Calendar days of daily history requested from the data provider.
    pub lookback_days: u32,
    pub params: BoxParams,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = BoxParams::default();
        Self {
            port: env_parsed("PORT", 8000),
            lookback_days: env_parsed("LOOKBACK_DAYS", 60),
            params: BoxParams {
                n_up: env_parsed("N_UP", defaults.n_up),
                n_down: env_parsed("N_DOWN", defaults.n_down),
                volume_multiplier: env_parsed("VOLUME_MULTIPLIER", defaults.volume_multiplier),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            lookback_days: 60,
            params: BoxParams::default(),
        }
    }
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
