// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The access token is not part of [`Config`]: it is supplied per run via
//! the CLI (or `STRAVA_ACCESS_TOKEN`), since its lifetime is one process
//! invocation.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default minimum spacing between outbound Strava requests, in seconds.
/// Strava enforces a hard request budget per 15-minute window; 9 seconds
/// keeps a full-history export safely under it.
pub const DEFAULT_MIN_REQUEST_INTERVAL_SECS: f64 = 9.0;

/// Default page size for the activity list walk.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava API base URL (overridable for tests)
    pub base_url: String,
    /// Root directory of the local archive (activities/, zones/, error.log)
    pub archive_dir: PathBuf,
    /// Minimum spacing between any two outbound requests
    pub min_request_interval: Duration,
    /// Activities per page for the list walk
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let interval_secs = match env::var("MIN_REQUEST_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<f64>()
                .map_err(|_| ConfigError::Invalid("MIN_REQUEST_INTERVAL_SECS"))?,
            Err(_) => DEFAULT_MIN_REQUEST_INTERVAL_SECS,
        };
        if !interval_secs.is_finite() || interval_secs < 0.0 {
            return Err(ConfigError::Invalid("MIN_REQUEST_INTERVAL_SECS"));
        }

        let page_size = match env::var("STRAVA_PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| ConfigError::Invalid("STRAVA_PAGE_SIZE"))?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(ConfigError::Invalid("STRAVA_PAGE_SIZE"));
        }

        Ok(Self {
            base_url: env::var("STRAVA_BASE_URL")
                .unwrap_or_else(|_| "https://www.strava.com/api/v3".to_string()),
            archive_dir: env::var("ARCHIVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            min_request_interval: Duration::from_secs_f64(interval_secs),
            page_size,
        })
    }

    /// Default config for tests.
    pub fn test_default() -> Self {
        Self {
            base_url: "https://strava.invalid/api/v3".to_string(),
            archive_dir: PathBuf::from("."),
            min_request_interval: Duration::from_millis(0),
            page_size: 2,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
