use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_JOBS_API_BASE_URL: &str = "https://admin.hrpostingpartner.com";
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://admin.hrpostingpartner.com/storage";
pub const DEFAULT_SITE_URL: &str = "https://www.hrpostingpartner.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub jobs_api_base_url: String,
    pub storage_base_url: String,
    pub site_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Staleness window for `/api/jobs` listing responses.
    pub slider_cache_ttl: Duration,
    /// Staleness window for `/api/jobs/{slug}` responses.
    pub detail_cache_ttl: Duration,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jobs_api_base_url: env_or("JOBS_API_BASE_URL", DEFAULT_JOBS_API_BASE_URL),
            storage_base_url: env_or("STORAGE_BASE_URL", DEFAULT_STORAGE_BASE_URL),
            site_url: env_or("SITE_URL", DEFAULT_SITE_URL),
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            slider_cache_ttl: secs_from_env("SLIDER_CACHE_TTL_SECS", 6 * 60 * 60)?,
            detail_cache_ttl: secs_from_env("DETAIL_CACHE_TTL_SECS", 60)?,
            http_timeout: secs_from_env("HTTP_TIMEOUT_SECS", 15)?,
        })
    }

    /// Config pointing the API client at `base_url`, everything else default.
    /// Used by tests that stand up a mock upstream.
    #[cfg(test)]
    pub fn for_upstream(base_url: &str) -> Self {
        Config {
            jobs_api_base_url: base_url.to_string(),
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            port: 3000,
            rust_log: "info".to_string(),
            slider_cache_ttl: Duration::from_secs(6 * 60 * 60),
            detail_cache_ttl: Duration::from_secs(60),
            http_timeout: Duration::from_secs(5),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn secs_from_env(key: &str, default: u64) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{key} must be a whole number of seconds")),
        _ => Ok(Duration::from_secs(default)),
    }
}
