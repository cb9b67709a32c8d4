use std::env;

use thiserror::Error;

#[derive(Clone, Debug)]
pub struct Config {
    pub store_path: String,
    pub event_capacity: usize,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OXITRACK_EVENT_CAPACITY must be a positive integer")]
    InvalidEventCapacity,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let store_path =
            env::var("OXITRACK_STORE").unwrap_or_else(|_| "oxitrack.json".to_string());

        let event_capacity = env::var("OXITRACK_EVENT_CAPACITY")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidEventCapacity)?;
        if event_capacity == 0 {
            return Err(ConfigError::InvalidEventCapacity);
        }

        Ok(Config {
            store_path,
            event_capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: "oxitrack.json".to_string(),
            event_capacity: 1000,
        }
    }
}
