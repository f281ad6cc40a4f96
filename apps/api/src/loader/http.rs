use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{parse_document, DataLoader, LoadError, DATA_PATH};
use crate::models::ResumeDocument;

/// Fetches `data/data.json` from a remote site with a single GET.
#[derive(Clone)]
pub struct HttpDataLoader {
    client: Client,
    url: String,
}

impl HttpDataLoader {
    /// `base_url` is the site root; a URL that already names a `.json` file is used as-is.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: data_url(base_url),
        })
    }
}

fn data_url(base_url: &str) -> String {
    if base_url.ends_with(".json") {
        base_url.to_string()
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), DATA_PATH)
    }
}

#[async_trait]
impl DataLoader for HttpDataLoader {
    async fn load(&self) -> Result<ResumeDocument, LoadError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", self.url, status);
            return Err(LoadError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes from {}", body.len(), self.url);
        parse_document(&body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
