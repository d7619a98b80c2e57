use crate::constants::{
    DEFAULT_ACCOUNT_DELAY_MS, DEFAULT_BASE_URL, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

pub const APP_ID_ENV: &str = "INSTAGRAM_APP_ID";
pub const COOKIE_ENV: &str = "INSTAGRAM_COOKIE";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Credentials {
    pub app_id: String,
    pub cookie: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

/// Pacing of the batch run. Delays are fixed courtesy sleeps, not backoff.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScraperConfig {
    pub page_delay_ms: u64,
    pub account_delay_ms: u64,
    pub max_page_size: u32,
}

impl ScraperConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn account_delay(&self) -> Duration {
        Duration::from_millis(self.account_delay_ms)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            account_delay_ms: DEFAULT_ACCOUNT_DELAY_MS,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl Credentials {
    /// Reads both credentials from the environment, failing on the first missing one.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            app_id: required_env(APP_ID_ENV)?,
            cookie: required_env(COOKIE_ENV)?,
        })
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"app_id\":\"{}\",\"cookie\":\"[REDACTED]\"}}",
            self.app_id
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"scraper\":{}}}",
            self.credentials, self.rest_api, self.scraper
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for ScraperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"page_delay_ms\":{},\"account_delay_ms\":{},\"max_page_size\":{}}}",
            self.page_delay_ms, self.account_delay_ms, self.max_page_size
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

fn required_env(env_var: &str) -> Result<String, AppError> {
    match env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => {
            error!("{} not found in environment", env_var);
            Err(AppError::MissingCredentials(env_var.to_string()))
        }
    }
}

impl Config {
    /// Builds the run configuration from the environment.
    ///
    /// Missing credentials are the only fatal condition; everything else falls back
    /// to its default.
    pub fn new() -> Result<Self, AppError> {
        Ok(Self::with_credentials(Credentials::from_env()?))
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        let max_page_size = get_env_or_default("INSTAGRAM_MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE);
        Config {
            credentials,
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "INSTAGRAM_BASE_URL",
                    String::from(DEFAULT_BASE_URL),
                ),
                timeout: get_env_or_default("INSTAGRAM_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            scraper: ScraperConfig {
                page_delay_ms: get_env_or_default("INSTAGRAM_PAGE_DELAY_MS", DEFAULT_PAGE_DELAY_MS),
                account_delay_ms: get_env_or_default(
                    "INSTAGRAM_ACCOUNT_DELAY_MS",
                    DEFAULT_ACCOUNT_DELAY_MS,
                ),
                max_page_size: if max_page_size == 0 {
                    DEFAULT_MAX_PAGE_SIZE
                } else {
                    max_page_size
                },
            },
        }
    }
}
