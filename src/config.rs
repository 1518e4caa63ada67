use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the companion service (masteries, recommendations, predictions).
    pub service_url: String,
    pub region: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service_url = env::var("DRAFTLAB_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "euw1".to_string());

        Config {
            service_url: service_url.trim_end_matches('/').to_string(),
            region,
        }
    }
}

/// Riot credentials, only needed by the `collect` subcommand.
#[derive(Debug, Clone)]
pub struct RiotConfig {
    pub api_key: String,
    pub region: String,
}

impl RiotConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").map_err(|_| {
            AppError::ConfigError("RIOT_API_KEY not found in .env file".to_string())
        })?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "euw1".to_string());

        Ok(RiotConfig { api_key, region })
    }
}
