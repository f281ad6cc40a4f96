use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{parse_document, DataLoader, LoadError, DATA_PATH};
use crate::models::ResumeDocument;

/// Reads `data/data.json` below the site directory on every load.
/// A missing file is reported like the 404 a static file server would give.
pub struct FileDataLoader {
    path: PathBuf,
}

impl FileDataLoader {
    pub fn new(site_dir: &Path) -> Self {
        Self {
            path: site_dir.join(DATA_PATH),
        }
    }
}

#[async_trait]
impl DataLoader for FileDataLoader {
    async fn load(&self) -> Result<ResumeDocument, LoadError> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::Fetch { status: 404 });
            }
            Err(e) => return Err(LoadError::Io(e)),
        };
        debug!("Read {} bytes from {}", body.len(), self.path.display());
        parse_document(&body)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
