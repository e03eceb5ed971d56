//! Adapter configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Persistence API configuration loaded from environment
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the quest backend, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("LESSONFORGE_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_ms: u64 = env::var("LESSONFORGE_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .context("LESSONFORGE_REQUEST_TIMEOUT_MS must be a number of milliseconds")?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env vars are process-global; only assert the defaults when the
        // variables are genuinely absent.
        if env::var("LESSONFORGE_API_BASE_URL").is_err()
            && env::var("LESSONFORGE_REQUEST_TIMEOUT_MS").is_err()
        {
            let config = ApiConfig::from_env().unwrap();
            assert_eq!(config.base_url, "http://localhost:3000/api");
            assert_eq!(config.request_timeout, Duration::from_millis(30_000));
        }
    }
}
