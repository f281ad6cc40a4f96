use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::loader::{DataLoader, FileDataLoader, HttpDataLoader};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where the résumé document comes from. Consulted on every page load.
    pub loader: Arc<dyn DataLoader>,
}

impl AppState {
    pub fn new(config: Config, loader: Arc<dyn DataLoader>) -> Self {
        Self { config, loader }
    }

    /// Picks the HTTP loader when `DATA_URL` is set, the site directory otherwise.
    pub fn from_config(config: Config) -> Result<Self> {
        let loader: Arc<dyn DataLoader> = match &config.data_url {
            Some(url) => Arc::new(HttpDataLoader::new(url, config.fetch_timeout)?),
            None => Arc::new(FileDataLoader::new(&config.site_dir)),
        };
        info!("Resume data source: {}", loader.location());
        Ok(Self::new(config, loader))
    }
}
