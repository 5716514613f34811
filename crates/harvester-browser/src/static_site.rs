//! In-memory sessions over fixed HTML documents.
//!
//! [`StaticSessionProvider`] serves a map of URL to HTML through the
//! [`Session`] trait so pagination, batching and extraction can be exercised
//! without launching Chrome. Waits never sleep: a selector either matches the
//! stored document or the wait fails immediately with a timeout.

use crate::error::{BrowserError, Result};
use crate::session::{Session, SessionProvider};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Acquisition bookkeeping shared between a provider and its sessions.
#[derive(Debug, Default)]
pub struct SessionStats {
    acquired: AtomicUsize,
    released: AtomicUsize,
    visited: Mutex<Vec<(String, Instant)>>,
}

impl SessionStats {
    /// Sessions handed out so far
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Sessions closed so far
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Every URL navigated to, across all sessions, in call order
    pub fn visited(&self) -> Vec<String> {
        self.navigations().into_iter().map(|(url, _)| url).collect()
    }

    /// Every navigation with the instant it started, in call order
    pub fn navigations(&self) -> Vec<(String, Instant)> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

/// Provider of sessions over a fixed set of pages.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    pages: Arc<HashMap<String, String>>,
    latency: Arc<HashMap<String, Duration>>,
    stats: Arc<SessionStats>,
}

impl StaticSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.into(), html.into());
        self
    }

    /// Delay navigation to `url` by `delay`
    #[must_use]
    pub fn with_latency(mut self, url: impl Into<String>, delay: Duration) -> Self {
        Arc::make_mut(&mut self.latency).insert(url.into(), delay);
        self
    }

    pub fn stats(&self) -> Arc<SessionStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait::async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        self.stats.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StaticSession {
            pages: Arc::clone(&self.pages),
            latency: Arc::clone(&self.latency),
            stats: Arc::clone(&self.stats),
            current: Mutex::new(String::new()),
        }))
    }
}

/// A session whose documents come from a [`StaticSessionProvider`].
pub struct StaticSession {
    pages: Arc<HashMap<String, String>>,
    latency: Arc<HashMap<String, Duration>>,
    stats: Arc<SessionStats>,
    current: Mutex<String>,
}

impl StaticSession {
    fn current(&self) -> String {
        self.current.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn matches(&self, selector: &str) -> Result<usize> {
        let selector = Selector::parse(selector)
            .map_err(|e| BrowserError::InvalidSelector(format!("{selector}: {e}")))?;
        let document = Html::parse_document(&self.current());
        Ok(document.select(&selector).count())
    }
}

#[async_trait::async_trait]
impl Session for StaticSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        if let Ok(mut visited) = self.stats.visited.lock() {
            visited.push((url.to_string(), Instant::now()));
        }
        if let Some(delay) = self.latency.get(url) {
            tokio::time::sleep(*delay).await;
        }
        // Unknown URLs render as an empty document, like a blank page
        let html = self.pages.get(url).cloned().unwrap_or_default();
        if let Ok(mut current) = self.current.lock() {
            *current = html;
        }
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        if self.matches(selector)? > 0 {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        self.matches(selector)
    }

    async fn content(&self) -> Result<String> {
        Ok(self.current())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.stats.released.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_session_serves_pages() {
        let provider = StaticSessionProvider::new()
            .with_page("https://site.test/a", r#"<div class="row">one</div>"#);
        let stats = provider.stats();

        let session = provider.acquire().await.expect("acquire");
        session.navigate("https://site.test/a").await.expect("navigate");
        assert_eq!(session.count(".row").await.expect("count"), 1);
        assert!(session
            .wait_for_selector(".row", Duration::from_secs(1))
            .await
            .is_ok());

        let missing = session
            .wait_for_selector(".absent", Duration::from_secs(1))
            .await
            .expect_err("absent selector");
        assert!(missing.is_timeout());

        provider.release(session).await;
        assert_eq!(stats.acquired(), 1);
        assert_eq!(stats.released(), 1);
        assert_eq!(stats.visited(), vec!["https://site.test/a".to_string()]);
        assert_eq!(stats.navigations().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_url_is_blank() {
        let provider = StaticSessionProvider::new();
        let session = provider.acquire().await.expect("acquire");
        session.navigate("https://site.test/missing").await.expect("navigate");
        assert_eq!(session.count("div").await.expect("count"), 0);
        provider.release(session).await;
    }

    #[tokio::test]
    async fn test_invalid_selector() {
        let provider = StaticSessionProvider::new();
        let session = provider.acquire().await.expect("acquire");
        let err = session.count("<<").await.expect_err("invalid selector");
        assert!(matches!(err, BrowserError::InvalidSelector(_)));
        provider.release(session).await;
    }
}
