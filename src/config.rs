//! Configuration for the dashboard backend.
//!
//! All settings come from environment variables, read once at startup.
//! The resulting value is passed explicitly into the upstream client and
//! the router; business logic never consults the environment itself.

use serde::{Deserialize, Serialize};
use std::env;

use crate::{DashboardError, Result};

/// Runtime configuration, constructed once at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen port (`PORT`)
    pub port: u16,
    /// PWS station identifier (`STATION_ID`)
    pub station_id: String,
    /// Upstream API key (`WEATHER_API_KEY`)
    pub api_key: String,
    /// Deployment environment (`NODE_ENV`); `production` enables the
    /// CORS origin allow-list
    pub environment: String,
    /// Origins allowed when running in production (`CORS_ORIGIN`,
    /// comma-separated)
    pub cors_origins: Vec<String>,
    /// Base URL of the upstream PWS API (`UPSTREAM_BASE_URL`)
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds (`REQUEST_TIMEOUT_SECS`)
    pub timeout_seconds: u64,
    /// Retries for transient upstream failures (`MAX_RETRIES`)
    pub max_retries: u32,
}

// Default value functions
fn default_port() -> u16 {
    4000
}

fn default_station_id() -> String {
    "IBARIA12".to_string()
}

fn default_api_key() -> String {
    "8b1e015fdac04f1b9e015fdac09f1b40".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_upstream_base_url() -> String {
    "https://api.weather.com/v2/pws".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            station_id: default_station_id(),
            api_key: default_api_key(),
            environment: default_environment(),
            cors_origins: Vec::new(),
            upstream_base_url: default_upstream_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

fn string_var(name: &str, default: fn() -> String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(default)
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| DashboardError::config(format!("Invalid {name} value: {raw}"))),
        _ => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from environment variables and validate it.
    pub fn from_env() -> Result<Self> {
        let cors_origins = env::var("CORS_ORIGIN")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            port: parsed_var("PORT", default_port())?,
            station_id: string_var("STATION_ID", default_station_id),
            api_key: string_var("WEATHER_API_KEY", default_api_key),
            environment: string_var("NODE_ENV", default_environment),
            cors_origins,
            upstream_base_url: string_var("UPSTREAM_BASE_URL", default_upstream_base_url),
            timeout_seconds: parsed_var("REQUEST_TIMEOUT_SECS", default_timeout())?,
            max_retries: parsed_var("MAX_RETRIES", default_max_retries())?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Whether the CORS origin allow-list applies.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Validate all configuration settings.
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        Ok(())
    }

    fn validate_credentials(&self) -> Result<()> {
        if self.station_id.is_empty() {
            return Err(DashboardError::config("STATION_ID cannot be empty"));
        }

        if self.api_key.is_empty() {
            return Err(DashboardError::config("WEATHER_API_KEY cannot be empty"));
        }

        if self.api_key.len() < 8 || self.api_key.len() > 100 {
            return Err(DashboardError::config(
                "WEATHER_API_KEY appears to be invalid. Please check your API key.",
            ));
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(DashboardError::config(
                "Request timeout must be between 1 and 300 seconds",
            ));
        }

        if self.max_retries > 10 {
            return Err(DashboardError::config("Max retries cannot exceed 10"));
        }

        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        if !self.upstream_base_url.starts_with("http://")
            && !self.upstream_base_url.starts_with("https://")
        {
            return Err(DashboardError::config(
                "Upstream base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.is_production() && self.cors_origins.is_empty() {
            return Err(DashboardError::config(
                "CORS_ORIGIN must list at least one origin when NODE_ENV=production",
            ));
        }

        Ok(())
    }
}
