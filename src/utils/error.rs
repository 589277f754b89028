//! Error types for the Artgrid gallery engine

use thiserror::Error;

/// Main error type for gallery operations
#[derive(Debug, Error)]
pub enum ArtgridError {
    /// Fetch-related errors
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    /// Markup parsing/scanning errors
    #[error("markup error: {0}")]
    Markup(#[from] MarkupError),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Fetch-specific errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint or assembled request URL is unusable
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The request exceeded its configured timeout
    #[error("request timed out")]
    Timeout,
    /// HTTP error with status code
    #[error("HTTP status {0}")]
    Http(u16),
    /// Transport-level failure (connection, TLS, body read)
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response body did not match the expected envelope shape
    #[error("malformed response payload: {0}")]
    Decode(String),
}

/// Markup-specific errors
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The fragment could not be read into a document
    #[error("fragment parse failed: {0}")]
    Parse(String),
}

/// Convenience Result type for gallery operations
pub type Result<T> = std::result::Result<T, ArtgridError>;
