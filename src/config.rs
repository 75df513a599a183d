use std::env;
use std::time::Duration;

use crate::services::github::DEFAULT_API_URL;
use crate::services::retry::RetryConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// GitHub API root; override for GitHub Enterprise deployments
    pub github_api_url: String,
    /// Affiliation filter for the logged-in-user selector
    pub user_affiliation: String,
    /// Resolve contributor display names via profile lookups
    pub resolve_member_names: bool,
    /// Remote-call attempt budget, first attempt included
    pub retry_max_attempts: usize,
    /// Delay before the second attempt, in milliseconds
    pub retry_initial_interval_ms: u64,
    /// Backoff multiplier between attempts
    pub retry_backoff_factor: f32,
    /// Optional wall-clock budget per retried call, in milliseconds
    pub retry_overall_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let github_api_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let user_affiliation = env::var("GITLINK_USER_AFFILIATION")
            .unwrap_or_else(|_| "owner,collaborator,organization_member".to_string());

        let resolve_member_names = env::var("GITLINK_RESOLVE_MEMBER_NAMES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let retry_max_attempts = env::var("GITLINK_RETRY_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GITLINK_RETRY_MAX_ATTEMPTS"))?;

        let retry_initial_interval_ms = env::var("GITLINK_RETRY_INITIAL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GITLINK_RETRY_INITIAL_INTERVAL_MS"))?;

        let retry_backoff_factor = env::var("GITLINK_RETRY_BACKOFF_FACTOR")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("GITLINK_RETRY_BACKOFF_FACTOR"))?;

        let retry_overall_timeout_ms = match env::var("GITLINK_RETRY_OVERALL_TIMEOUT_MS") {
            Ok(value) => Some(
                value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("GITLINK_RETRY_OVERALL_TIMEOUT_MS"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            host,
            port,
            github_api_url,
            user_affiliation,
            resolve_member_names,
            retry_max_attempts,
            retry_initial_interval_ms,
            retry_backoff_factor,
            retry_overall_timeout_ms,
        })
    }

    /// Retry policy shared by every remote call of one request.
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.retry_max_attempts,
            initial_interval: Duration::from_millis(self.retry_initial_interval_ms),
            backoff_factor: self.retry_backoff_factor,
            overall_timeout: self.retry_overall_timeout_ms.map(Duration::from_millis),
            with_jitter: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
