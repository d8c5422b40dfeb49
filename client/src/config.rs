//! Configuration management for the Stock Admin client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with STOCK_ADMIN__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::DEFAULT_PAGE_SIZE;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Session cookie and route guard configuration
    pub session: SessionConfig,

    /// List view configuration
    pub list: ListConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Attach `Authorization: Bearer <token>` when a session is open
    pub send_bearer_token: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Name of the cookie holding the token
    pub cookie_name: String,

    /// Cookie lifetime in seconds
    pub max_age_secs: i64,

    /// Where unauthenticated navigation is sent
    pub login_path: String,

    /// Where an authenticated user visiting the login page is sent
    pub home_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    /// Rows per page
    pub page_size: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("STOCK_ADMIN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STOCK_ADMIN__ prefix)
            .add_source(
                Environment::with_prefix("STOCK_ADMIN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Defaults only, without files or environment
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("api.base_url", "http://localhost:3000/api")?
            .set_default("api.timeout_secs", 30)?
            .set_default("api.send_bearer_token", false)?
            .set_default("session.cookie_name", "token")?
            .set_default("session.max_age_secs", 7200)?
            .set_default("session.login_path", "/login")?
            .set_default("session.home_path", "/")?
            .set_default("list.page_size", DEFAULT_PAGE_SIZE as u64)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_string(),
            max_age_secs: 7200,
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
