/// Data loader: the only place the résumé document enters the service.
///
/// One attempt per load, no retries and no caching beyond what the transport does.
/// Every failure bubbles up to the page bootstrap, which owns presentation.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::ResumeDocument;

pub mod file;
pub mod http;

pub use file::FileDataLoader;
pub use http::HttpDataLoader;

/// Path of the document relative to the site root.
pub const DATA_PATH: &str = "data/data.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },

    #[error("Could not reach data source: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Resume data must be a JSON object")]
    NotAnObject,

    #[error("Could not read data file: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True for failures of the fetch itself, as opposed to its content.
    pub fn is_upstream(&self) -> bool {
        matches!(self, LoadError::Fetch { .. } | LoadError::Transport(_))
    }
}

#[async_trait]
pub trait DataLoader: Send + Sync {
    async fn load(&self) -> Result<ResumeDocument, LoadError>;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;
}

/// Parses a raw body into a document. The root must be an object; the sections
/// inside it are parsed independently.
pub fn parse_document(body: &[u8]) -> Result<ResumeDocument, LoadError> {
    let value: Value = serde_json::from_slice(body)?;
    parse_value(&value)
}

pub fn parse_value(value: &Value) -> Result<ResumeDocument, LoadError> {
    let root = value.as_object().ok_or(LoadError::NotAnObject)?;
    debug!("Parsed resume document with {} top-level keys", root.len());
    Ok(ResumeDocument::from_object(root))
}

/// Serves an already-parsed value. Backs the live preview endpoint.
pub struct StaticDataLoader {
    value: Value,
}

impl StaticDataLoader {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

#[async_trait]
impl DataLoader for StaticDataLoader {
    async fn load(&self) -> Result<ResumeDocument, LoadError> {
        parse_value(&self.value)
    }

    fn location(&self) -> String {
        "inline preview data".to_string()
    }
}
