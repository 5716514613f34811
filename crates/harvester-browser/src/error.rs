use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("browser launch failed: {0}")]
    LaunchError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("timed out after {timeout:?} waiting for {selector}")]
    Timeout { selector: String, timeout: Duration },
}

impl BrowserError {
    /// Whether this error is a wait that ran out of time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::NavigationError("page not found".to_string());
        assert_eq!(err.to_string(), "navigation failed: page not found");
    }

    #[test]
    fn test_timeout_error() {
        let err = BrowserError::Timeout {
            selector: ".list-element".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains(".list-element"));
        assert!(!BrowserError::ChromiumError("gone".to_string()).is_timeout());
    }
}
