use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_DATA_URL: &str = "https://data.princegeorgescountymd.gov/resource/umjn-t2iz.json";
pub const DEFAULT_SAMPLE_SIZE: usize = 15;
pub const MAX_SAMPLE_SIZE: usize = 1_000;

/// Application configuration loaded explicitly from environment variables.
///
/// Every setting has a default; the dataset URL is fixed configuration, never user input.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON endpoint returning an array of restaurant objects.
    pub data_url: String,
    /// Per-request timeout for the dataset fetch.
    pub fetch_timeout: Duration,
    /// Retries after a transient fetch failure.
    pub fetch_max_retries: u32,
    /// Number of restaurants drawn on each submit.
    pub sample_size: usize,
    /// Seed for the sampling RNG. `None` seeds from the OS.
    pub sample_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RESTAURANT_DATA_URL`: dataset endpoint (http or https)
    /// - `FETCH_TIMEOUT_SECS`: request timeout, default 30
    /// - `FETCH_MAX_RETRIES`: retry budget, default 1
    /// - `SAMPLE_SIZE`: restaurants per submit, default 15, at most 1000
    /// - `SAMPLE_SEED`: fixed RNG seed for reproducible samples
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let data_url = lookup("RESTAURANT_DATA_URL").unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
        if !(data_url.starts_with("http://") || data_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "RESTAURANT_DATA_URL must be an http(s) URL, got '{data_url}'"
            )));
        }

        let timeout_secs: u64 = parse_var(&lookup, "FETCH_TIMEOUT_SECS")?.unwrap_or(30);
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "FETCH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let sample_size = parse_var(&lookup, "SAMPLE_SIZE")?.unwrap_or(DEFAULT_SAMPLE_SIZE);
        if sample_size > MAX_SAMPLE_SIZE {
            return Err(AppError::Config(format!(
                "SAMPLE_SIZE must be at most {MAX_SAMPLE_SIZE}, got {sample_size}"
            )));
        }

        Ok(Self {
            data_url,
            fetch_timeout: Duration::from_secs(timeout_secs),
            fetch_max_retries: parse_var(&lookup, "FETCH_MAX_RETRIES")?.unwrap_or(1),
            sample_size,
            sample_seed: parse_var(&lookup, "SAMPLE_SEED")?,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{key} has invalid value '{raw}'"))),
    }
}
