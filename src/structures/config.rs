use std::fs;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yml::Error,
    },
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: String,
    pub queries: String,
    pub routing: RoutingSettings,
}

/// Travel-time settings, supplied once before the transit graph is built.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutingSettings {
    /// Average bus velocity in km/h.
    pub bus_velocity: f64,
    /// Average wait for any bus at a stop, in minutes.
    pub bus_wait_time: f64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}
