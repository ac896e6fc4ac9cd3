use crate::error::AppError;
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

pub const PROVIDER_ID_PLACEHOLDER: &str = "{provider_id}";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub availability_commit_path: String, // Must contain {provider_id}
    pub default_timezone: Tz,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            api_timeout: Duration::from_secs(30),
            availability_commit_path: format!("/services/availability/{}", PROVIDER_ID_PLACEHOLDER),
            default_timezone: chrono_tz::UTC,
            log_dir: "./logs".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let api_timeout = match env::var("API_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                AppError::Config(format!("API_TIMEOUT_SECS must be a number, got '{}'", raw))
            })?),
            Err(_) => defaults.api_timeout,
        };

        let default_timezone = match env::var("DEFAULT_TIMEZONE") {
            Ok(raw) => raw.parse::<Tz>().map_err(|_| {
                AppError::Config(format!("DEFAULT_TIMEZONE is not a known timezone: '{}'", raw))
            })?,
            Err(_) => defaults.default_timezone,
        };

        let availability_commit_path = env::var("AVAILABILITY_COMMIT_PATH")
            .unwrap_or(defaults.availability_commit_path);
        if !availability_commit_path.contains(PROVIDER_ID_PLACEHOLDER) {
            return Err(AppError::Config(format!(
                "AVAILABILITY_COMMIT_PATH must contain {}", PROVIDER_ID_PLACEHOLDER
            )));
        }

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_timeout,
            availability_commit_path,
            default_timezone,
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        })
    }

    pub fn commit_path_for(&self, provider_id: &str) -> String {
        self.availability_commit_path.replace(PROVIDER_ID_PLACEHOLDER, provider_id)
    }
}
