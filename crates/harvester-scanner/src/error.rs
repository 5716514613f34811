//! Error types for scanning operations.

use thiserror::Error;

/// Errors raised while walking the directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The profile marker never appeared
    #[error("Page timed out: {url}")]
    PageTimedOut { url: String },

    /// A contract selector does not parse
    #[error("Invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A listing or profile URL could not be built
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Browser error: {0}")]
    Browser(#[from] harvester_browser::BrowserError),

    #[error("Store error: {0}")]
    Store(#[from] harvester_store::StoreError),

    /// The blocking merge task panicked or was cancelled
    #[error("Store task failed: {0}")]
    StoreTask(String),
}

/// Result type alias for scanning operations.
pub type Result<T> = std::result::Result<T, ScanError>;
