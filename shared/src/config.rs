//! Remote store configuration
//!
//! ## Configuration Sources
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Keys
//! - `SUPABASE_URL` (or `NEXT_PUBLIC_SUPABASE_URL`): base URL of the table store (required)
//! - `SUPABASE_ANON_KEY` (or `NEXT_PUBLIC_SUPABASE_ANON_KEY`): access key (required)
//! - `ROSTER_REQUEST_TIMEOUT_SECS`: per-request timeout, defaults to 30

use std::fmt;
use std::time::Duration;
use url::Url;

use crate::errors::{SharedError, SharedResult};

/// Connection settings for the remote table store
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: Url,
    pub api_key: String,
    pub request_timeout: Duration,
}

impl StoreConfig {
    /// Base URL variables, in lookup order
    pub const URL_KEYS: &'static [&'static str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];

    /// Access key variables, in lookup order
    pub const API_KEY_KEYS: &'static [&'static str] = &["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];

    pub const TIMEOUT_KEY: &'static str = "ROSTER_REQUEST_TIMEOUT_SECS";

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> SharedResult<Self> {
        // Silently ignored when no .env file exists
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_of = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        let raw_url = first_of(Self::URL_KEYS);
        let api_key = first_of(Self::API_KEY_KEYS);

        let mut missing = Vec::new();
        if raw_url.is_none() {
            missing.push(Self::URL_KEYS[0]);
        }
        if api_key.is_none() {
            missing.push(Self::API_KEY_KEYS[0]);
        }

        let (Some(raw_url), Some(api_key)) = (raw_url, api_key) else {
            return Err(SharedError::MissingConfig {
                field: missing.join(", "),
            });
        };

        let base_url = Url::parse(&raw_url).map_err(|_| SharedError::InvalidConfig {
            field: Self::URL_KEYS[0].to_string(),
            value: raw_url.clone(),
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SharedError::InvalidConfig {
                field: Self::URL_KEYS[0].to_string(),
                value: raw_url,
            });
        }

        let request_timeout = match lookup(Self::TIMEOUT_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(SharedError::InvalidConfig {
                    field: Self::TIMEOUT_KEY.to_string(),
                    value: raw,
                })?,
            None => Self::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            api_key,
            request_timeout,
        })
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
