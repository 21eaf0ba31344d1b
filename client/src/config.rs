//! Configuration management for the Pharmacy Stock client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PHARMA_ prefix

use std::path::PathBuf;
use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Session persistence configuration
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Backend origin, without the `/api` prefix
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Root of every API path
    pub fn endpoint(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// File holding the bearer token between CLI invocations
    pub token_file: PathBuf,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PHARMA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:8080")?
            .set_default("api.timeout_secs", 30)?
            .set_default("session.token_file", ".pharmacy-token")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PHARMA_ prefix)
            .add_source(
                Environment::with_prefix("PHARMA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let api = ApiConfig {
            base_url: "https://farmacia.example.org/".into(),
            timeout_secs: 5,
        };
        assert_eq!(api.endpoint(), "https://farmacia.example.org/api");
        assert_eq!(api.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_defaults() {
        let api = ApiConfig::default();
        assert_eq!(api.endpoint(), "http://localhost:8080/api");
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        std::env::set_var("PHARMA_API__BASE_URL", "http://farmacia.internal:9090");
        std::env::set_var("PHARMA_API__TIMEOUT_SECS", "7");
        let loaded = Config::load();
        std::env::remove_var("PHARMA_API__BASE_URL");
        std::env::remove_var("PHARMA_API__TIMEOUT_SECS");

        let config = loaded.unwrap();
        assert_eq!(config.api.base_url, "http://farmacia.internal:9090");
        assert_eq!(config.api.timeout(), Duration::from_secs(7));
    }
}
