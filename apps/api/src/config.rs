use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::render::{PageVariant, DEFAULT_TITLE};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Static site root; `data/data.json` is read from here unless `data_url` is set.
    pub site_dir: PathBuf,
    /// Remote site root to fetch `data/data.json` from.
    pub data_url: Option<String>,
    pub page_variant: PageVariant,
    pub title_prefix: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let fetch_timeout_secs = var("FETCH_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            site_dir: PathBuf::from(var("SITE_DIR", "site")),
            data_url: lookup("DATA_URL").filter(|url| !url.trim().is_empty()),
            page_variant: var("PAGE_VARIANT", "full")
                .parse::<PageVariant>()
                .map_err(|e| anyhow!(e))
                .context("PAGE_VARIANT is invalid")?,
            title_prefix: var("TITLE_PREFIX", DEFAULT_TITLE),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}
