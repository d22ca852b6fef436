//! Process configuration, read once at startup from the environment
//! (`.env` files are loaded by `main` via dotenvy before this runs).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::domain::table::table_query::DEFAULT_PAGE_SIZE;

/// Runtime configuration for the backend connection and the local run mode.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the plant backend, e.g. `http://localhost:4000/api/v1`.
    pub api_base: String,

    /// Sign-in credentials. Optional so read-only commands can still run
    /// and fail with a proper missing-credential state.
    pub account: Option<String>,
    pub password: Option<String>,

    /// Plant to scope queries to. `None` means the signed-in user's default.
    pub plant_id: Option<i64>,

    /// Width of the initial date-range filter, counted back from today.
    pub lookback_days: i64,

    pub page_size: u32,

    /// Aggregation bucket for history readings, in seconds. `None` lets
    /// the backend pick its default.
    pub bucket_sec: Option<u32>,

    /// Directory CSV exports are written into.
    pub export_dir: PathBuf,

    /// Re-poll interval for watch mode. `None` runs one-shot.
    pub watch_interval_secs: Option<u64>,

    /// When set, logs are also written to rolling files in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Absent variables fall back to defaults; present but malformed
    /// values are startup errors, not silent fallbacks.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base: env_or("SOLARVIEW_API_BASE", "http://localhost:4000/api/v1"),
            account: env_opt("SOLARVIEW_ACCOUNT"),
            password: env_opt("SOLARVIEW_PASSWORD"),
            plant_id: env_parse("SOLARVIEW_PLANT_ID")?,
            lookback_days: env_parse("SOLARVIEW_LOOKBACK_DAYS")?.unwrap_or(7),
            page_size: env_parse("SOLARVIEW_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE),
            bucket_sec: env_parse("SOLARVIEW_BUCKET_SEC")?,
            export_dir: env_or("SOLARVIEW_EXPORT_DIR", "./exports").into(),
            watch_interval_secs: env_parse("SOLARVIEW_WATCH_SECS")?,
            log_dir: env_opt("SOLARVIEW_LOG_DIR").map(PathBuf::from),
        })
    }

    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.account, &self.password) {
            (Some(account), Some(password)) => Some((account.as_str(), password.as_str())),
            _ => None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) if !value.is_empty() => {
            let parsed = value
                .parse()
                .with_context(|| format!("Invalid {key}={value}"))?;
            Ok(Some(parsed))
        }
        _ => Ok(None),
    }
}
