use crate::error::Result;
use std::time::Duration;

/// Capabilities of one isolated browser session.
#[async_trait::async_trait]
pub trait Session: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until an element matching `selector` exists, up to `timeout`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Count elements currently matching `selector`
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Rendered HTML of the current document
    async fn content(&self) -> Result<String>;

    /// Terminate the session and free everything it holds
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Hands out fresh, independent sessions.
///
/// Every session returned by [`acquire`](SessionProvider::acquire) must be
/// passed to [`release`](SessionProvider::release) exactly once, including on
/// error paths.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create a newly initialised session
    async fn acquire(&self) -> Result<Box<dyn Session>>;

    /// Terminate a session obtained from `acquire`
    async fn release(&self, session: Box<dyn Session>) {
        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session cleanly: {}", e);
        }
    }
}
