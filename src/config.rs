//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use crate::utils;
use std::time::Duration;
use url::Url;

const DEFAULT_RATE_FEED_URL: &str = "ws://127.0.0.1:3030/api/rate/lbtc-lusdt";
const DEFAULT_QUOTE_INTERVAL_SECS: u64 = 5;
const DEFAULT_RECONNECT_SECS: u64 = 3;

/// Consolidated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebSocket endpoint pushing `{ask, bid}` updates.
    pub rate_feed_url: Url,
    /// How often the current quote is logged.
    pub quote_interval: Duration,
    /// Delay before reconnecting to a dropped rate feed.
    pub reconnect_backoff: Duration,
    /// Alpha amount the form starts with
    pub initial_alpha_amount: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rate_feed_url = lookup("RATE_FEED_URL").unwrap_or_else(|| DEFAULT_RATE_FEED_URL.into());
        let rate_feed_url = Url::parse(&rate_feed_url)
            .map_err(|e| AppError::Config(format!("RATE_FEED_URL {rate_feed_url:?}: {e}")))?;
        if !matches!(rate_feed_url.scheme(), "ws" | "wss") {
            return Err(AppError::Config(format!(
                "RATE_FEED_URL must be ws:// or wss://, got {}",
                rate_feed_url.scheme()
            )));
        }

        let quote_interval = secs(&lookup, "QUOTE_INTERVAL_SECS", DEFAULT_QUOTE_INTERVAL_SECS)?;
        let reconnect_backoff = secs(&lookup, "RECONNECT_SECS", DEFAULT_RECONNECT_SECS)?;

        let initial_alpha_amount = match lookup("INITIAL_ALPHA_AMOUNT") {
            Some(raw) => {
                utils::parse_amount(&raw)
                    .map_err(|e| AppError::Config(format!("INITIAL_ALPHA_AMOUNT: {e}")))?;
                raw.trim().to_string()
            }
            None => crate::form::state::INITIAL_ALPHA_AMOUNT.to_string(),
        };

        Ok(Self {
            rate_feed_url,
            quote_interval,
            reconnect_backoff,
            initial_alpha_amount,
        })
    }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("{key} {raw:?}: {e}")))?,
        None => default,
    };
    if secs == 0 {
        return Err(AppError::Config(format!("{key} must be positive")));
    }
    Ok(Duration::from_secs(secs))
}
