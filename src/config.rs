//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use uuid::Uuid;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Whether the CORS middleware stage is active
    pub cors_enabled: bool,

    /// Value for the Access-Control-Allow-Origin header
    pub cors_allow_origin: String,

    /// Pre-registered bearer tokens for the static credential resolver
    pub api_tokens: Vec<TokenEntry>,
}

/// A single `API_TOKENS` entry: `token:user-uuid:email`
#[derive(Debug, Clone)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let cors_enabled = env::var("CORS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("CORS_ENABLED"))?;

        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let api_tokens = match env::var("API_TOKENS") {
            Ok(raw) => Self::parse_token_spec(&raw)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            environment,
            cors_enabled,
            cors_allow_origin,
            api_tokens,
        })
    }

    /// Parse an `API_TOKENS` spec: comma-separated `token:user-uuid:email` entries.
    fn parse_token_spec(raw: &str) -> Result<Vec<TokenEntry>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let mut parts = entry.splitn(3, ':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(token), Some(id), Some(email)) if !token.is_empty() && !email.is_empty() => {
                        let user_id = id.parse().map_err(|_| ConfigError::InvalidValue("API_TOKENS"))?;
                        Ok(TokenEntry {
                            token: token.to_string(),
                            user_id,
                            email: email.to_string(),
                        })
                    }
                    _ => Err(ConfigError::InvalidValue("API_TOKENS")),
                }
            })
            .collect()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
