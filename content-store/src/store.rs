use std::path::PathBuf;

use thiserror::Error;

use crate::ContentCatalog;

/// Where the published content catalog lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentLocation {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Read-only access to the site's content catalog.
pub struct ContentStore {
    location: ContentLocation,
    client: reqwest::Client,
}

impl ContentStore {
    pub fn new(location: ContentLocation) -> Self {
        Self {
            location,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(ContentLocation::File(path.into()))
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(ContentLocation::Url(url.into()))
    }

    pub fn location(&self) -> &ContentLocation {
        &self.location
    }

    /// Reads and parses the whole catalog. Every call hits the underlying
    /// file or URL; callers are expected to cache the result.
    pub async fn load(&self) -> Result<ContentCatalog, ContentStoreError> {
        let bytes = match &self.location {
            ContentLocation::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| ContentStoreError::Io(format!("{}: {}", path.display(), e)))?,
            ContentLocation::Url(url) => self.fetch(url).await?,
        };

        let catalog = ContentCatalog::from_json(&bytes)
            .map_err(|e| ContentStoreError::Parse(e.to_string()))?;

        tracing::debug!(
            location = %self.location,
            records = catalog.len(),
            "Loaded content catalog"
        );

        Ok(catalog)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ContentStoreError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentStoreError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ContentStoreError::Status(resp.status().as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ContentStoreError::Http(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[derive(Error, Debug)]
pub enum ContentStoreError {
    #[error("IoError: {0}")]
    Io(String),
    #[error("HttpError: {0}")]
    Http(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("ParsingError: {0}")]
    Parse(String),
}
