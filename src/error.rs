use thiserror::Error;

/// Errors from the document and media stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Filesystem error while reading or writing
    #[error("I/O error: {0}")]
    Io(String),

    /// Requested entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key is not a plain relative name (empty, absolute, or traversing)
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Errors from the page-metadata scraper.
#[derive(Debug, Clone, Error)]
pub enum MetadataError {
    /// The URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network or HTTP failure while fetching the page
    #[error("Fetch failed: {0}")]
    Fetch(String),
}
