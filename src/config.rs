// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use validator::Validate;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:8000`
    #[validate(url)]
    pub api_url: String,
    /// Path prefix of the versioned API
    pub api_prefix: String,
    /// Bearer token to seed the session with (normally set after login)
    pub auth_token: Option<String>,
    /// Per-request timeout
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,
    /// Page size used by the dashboard fetch
    #[validate(range(min = 1))]
    pub page_size: u32,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    /// Default config pointing at a local backend.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            auth_token: None,
            request_timeout_secs: 30,
            page_size: 50,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let config = Self {
            api_url: env::var("ECOTWIN_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            api_prefix: env::var("ECOTWIN_API_PREFIX")
                .map(|v| normalize_prefix(&v))
                .unwrap_or(defaults.api_prefix),
            auth_token: env::var("ECOTWIN_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            request_timeout_secs: parse_var("ECOTWIN_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            page_size: parse_var("ECOTWIN_PAGE_SIZE", defaults.page_size)?,
            log_json: env::var("ECOTWIN_LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        config
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(config)
    }

    /// Base URL of the versioned API (`{api_url}{api_prefix}`).
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.api_url, self.api_prefix)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Parse(name)),
        Err(_) => Ok(default),
    }
}

/// Ensure a leading slash and no trailing slash; empty stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Parse(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
