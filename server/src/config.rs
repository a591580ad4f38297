use anyhow::{anyhow, Result};
use std::{env, fmt::Display, str::FromStr, time::Duration};

use client::ClientConfig;
use stay_core::fetch::RetryPolicy;
use tracing::info;

/// Runtime settings read from the environment. `HOTEL_API_URL` is required;
/// everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream_url: String,
    pub max_retries: u32,
    pub poll_attempts: u32,
    pub delay: Duration,
    pub timeout_secs: u64,
    pub cors_allow_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            upstream_url: require(&lookup, "HOTEL_API_URL")?,
            max_retries: try_load(&lookup, "FETCH_MAX_RETRIES", 3)?,
            poll_attempts: try_load(&lookup, "POLL_MAX_ATTEMPTS", 5)?,
            delay: Duration::from_millis(try_load(&lookup, "FETCH_DELAY_MS", 1000)?),
            timeout_secs: try_load(&lookup, "FETCH_TIMEOUT_SECS", 12)?,
            cors_allow_origin: lookup("CORS_ALLOW_ORIGIN").filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.upstream_url.clone(),
            timeout_secs: self.timeout_secs,
            details_policy: RetryPolicy::new(self.max_retries, self.delay),
            prices_policy: RetryPolicy::new(self.poll_attempts, self.delay),
            ..Default::default()
        }
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("environment variable {key} must be set"))
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| anyhow!("invalid {key} value '{raw}': {e}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
