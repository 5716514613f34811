//! Detail extraction for a single profile page.

use crate::error::{Result, ScanError};
use crate::parser::ProfileParser;
use harvester_browser::{Session, SessionProvider};
use harvester_core::{DetailRecord, PageContract, ScrapingConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Extracts one [`DetailRecord`] per profile URL.
///
/// Every call acquires its own session from the provider and releases it
/// before returning, whatever the outcome.
pub struct DetailExtractor {
    provider: Arc<dyn SessionProvider>,
    contract: Arc<PageContract>,
    profile: ProfileParser,
    settle: Duration,
    wait_timeout: Duration,
}

impl DetailExtractor {
    /// Create an extractor over `provider` for pages described by `contract`.
    pub fn new(
        provider: Arc<dyn SessionProvider>,
        contract: Arc<PageContract>,
        scraping: &ScrapingConfig,
    ) -> Result<Self> {
        let profile = ProfileParser::new(&contract)?;
        Ok(Self {
            provider,
            contract,
            profile,
            settle: scraping.settle(),
            wait_timeout: scraping.wait_timeout(),
        })
    }

    /// Extract the profile at `url` for the listed `full_name`.
    ///
    /// Returns `None` when the profile never rendered or the session failed;
    /// the failure is logged and never propagated.
    pub async fn extract(&self, url: &str, full_name: &str, ordinal: usize) -> Option<DetailRecord> {
        let session = match self.provider.acquire().await {
            Ok(session) => session,
            Err(e) => {
                error!("Error scraping {}: {}", url, e);
                return None;
            }
        };

        let outcome = self.extract_with(session.as_ref(), url, full_name, ordinal).await;
        self.provider.release(session).await;

        match outcome {
            Ok(record) => {
                debug!("Successfully scraped data for {}", full_name);
                Some(record)
            }
            Err(ScanError::PageTimedOut { url }) => {
                error!("Timeout while loading page for {}: {}", full_name, url);
                None
            }
            Err(e) => {
                error!("Error scraping {}: {}", url, e);
                None
            }
        }
    }

    async fn extract_with(
        &self,
        session: &dyn Session,
        url: &str,
        full_name: &str,
        ordinal: usize,
    ) -> Result<DetailRecord> {
        session.navigate(url).await?;
        tokio::time::sleep(self.settle).await;

        session
            .wait_for_selector(&self.contract.profile_marker, self.wait_timeout)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScanError::PageTimedOut {
                        url: url.to_string(),
                    }
                } else {
                    ScanError::Browser(e)
                }
            })?;

        let html = session.content().await?;
        let fields = self.profile.parse(&html);

        let country = fields.country.unwrap_or_else(|| {
            self.contract.country.presence.log_missing("Country", full_name);
            String::new()
        });
        let email = fields.email.unwrap_or_else(|| {
            self.contract.email.presence.log_missing("Email", full_name);
            String::new()
        });

        Ok(DetailRecord::new(ordinal, full_name, email, country))
    }
}

impl std::fmt::Debug for DetailExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailExtractor")
            .field("settle", &self.settle)
            .field("wait_timeout", &self.wait_timeout)
            .finish_non_exhaustive()
    }
}
