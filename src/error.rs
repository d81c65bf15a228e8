//! Error types for rs-goose.
//!
//! Only [`Error::InvalidUrl`] is ever returned from an extraction call; every
//! other variant is produced by a pipeline stage and absorbed by the
//! orchestrator, which degrades to a partial article instead.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL handed to the extractor could not be parsed.
    #[error("Invalid URL passed in: {0}")]
    InvalidUrl(String),

    /// Network failure or timeout while fetching a resource.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The server answered with something other than 200 OK.
    #[error("Response code for {url} was {status}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code received.
        status: u16,
    },

    /// The response was empty or not an HTML/XML document.
    #[error("Not an HTML document: {0}")]
    NotHtml(String),

    /// The response is larger than the configured limit.
    #[error("Response for {url} exceeds {limit} bytes")]
    MaxBytes {
        /// Requested URL.
        url: String,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// An image could not be downloaded, decoded or stored.
    #[error("Image processing failed: {0}")]
    Image(String),

    /// Local disk failure while handling temporary images.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
