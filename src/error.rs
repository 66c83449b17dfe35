//! Error types for goload

use thiserror::Error;

/// Main error type for goload operations
#[derive(Debug, Error)]
pub enum GoloadError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No source found. Try a different server.")]
    NoPlayableSource,

    #[error("Element not found: {0}")]
    MissingElement(String),

    #[error("Manifest fetch failed: {0}")]
    ManifestFetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Selector error: {0}")]
    Selector(String),
}

impl GoloadError {
    /// Check if error comes from cipher, Base64 or JSON decoding
    pub fn is_decode_error(&self) -> bool {
        matches!(self, GoloadError::Decode(_) | GoloadError::Json(_))
    }

    /// Check if the caller should move on to a different server id
    pub fn should_try_another_server(&self) -> bool {
        matches!(
            self,
            GoloadError::NoPlayableSource | GoloadError::MissingElement(_)
        )
    }
}
