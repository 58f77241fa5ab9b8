use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the attendance service, without a trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_dir: "logs".to_string(),
            log_level: tracing::Level::INFO,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let api_url = env::var("ATTENDANCE_API_URL").context("ATTENDANCE_API_URL must be set")?;
        if api_url.trim().is_empty() {
            bail!("ATTENDANCE_API_URL must not be empty");
        }

        let timeout_ms: u64 = env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string()) // default 10s
            .parse()
            .context("REQUEST_TIMEOUT_MS must be a whole number of milliseconds")?;

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse()
            .context("LOG_LEVEL must be one of trace, debug, info, warn, error")?;

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            request_timeout: Duration::from_millis(timeout_ms),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level,
        })
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let config = Config::new("http://localhost:5000//");
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
