//! Pagination driver for walking the directory.
//!
//! The driver owns one top-level session used only for listing pages. It
//! moves through [`DriverState`] one page and one batch at a time; all
//! concurrency lives inside [`BatchCoordinator`].

use crate::batch::BatchCoordinator;
use crate::error::Result;
use crate::extractor::DetailExtractor;
use crate::parser::{ListingParser, ListingRow};
use crate::url_builder::build_listing_url;
use harvester_browser::{Session, SessionProvider};
use harvester_core::{AppConfig, PageContract, ScrapingConfig};
use harvester_store::DirectoryStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A listing page, or the probe of the next one, had no entries
    EndOfDirectory,
    /// A listing page never showed a listing entry within the wait timeout
    PageTimedOut,
    /// The configured page cap was reached
    PageLimit,
    /// The run was cancelled from outside
    Cancelled,
    /// The listing session could not navigate
    NavigationFailed,
}

/// States of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverState {
    /// Load listing page `n` and wait for its entries
    FetchingPage(u32),
    /// Run the page's rows through the batch coordinator
    Dispatching {
        /// Current page
        page: u32,
        /// Rows read from the page
        rows: Vec<ListingRow>,
    },
    /// Check whether the page after `n` has entries
    ProbingNext(u32),
    /// Terminal
    Done(StopReason),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Listing pages whose entries were dispatched
    pub pages_visited: u32,
    /// Batches handed to the coordinator
    pub batches: usize,
    /// Records collected during this run (not the store total)
    pub records_collected: usize,
    /// Why the run ended
    pub stop_reason: StopReason,
}

#[derive(Debug, Default)]
struct Progress {
    pages_visited: u32,
    batches: usize,
    records_collected: usize,
}

/// Walks listing pages and dispatches their entries batch by batch.
pub struct PaginationDriver {
    provider: Arc<dyn SessionProvider>,
    contract: Arc<PageContract>,
    scraping: ScrapingConfig,
    listing: ListingParser,
    coordinator: BatchCoordinator,
    cancel: CancellationToken,
}

impl std::fmt::Debug for PaginationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationDriver")
            .field("scraping", &self.scraping)
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl PaginationDriver {
    /// Build a driver from the application config. Sessions come from `provider`.
    pub fn new(provider: Arc<dyn SessionProvider>, config: &AppConfig) -> Result<Self> {
        let contract = Arc::new(config.contract.clone());
        let extractor = Arc::new(DetailExtractor::new(
            Arc::clone(&provider),
            Arc::clone(&contract),
            &config.scraping,
        )?);
        let coordinator = BatchCoordinator::new(
            extractor,
            DirectoryStore::new(&config.store.path),
            config.scraping.stagger(),
        );

        Ok(Self {
            provider,
            listing: ListingParser::new(&contract)?,
            contract,
            scraping: config.scraping.clone(),
            coordinator,
            cancel: CancellationToken::new(),
        })
    }

    /// Stop at the next page or batch boundary once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Run until the directory is exhausted, a page limit is hit, or the run is
    /// cancelled.
    ///
    /// Records are persisted per batch, so an error or cancellation never
    /// loses data from batches that already completed. A persistence failure
    /// aborts the run and is returned.
    pub async fn run(&self) -> Result<RunSummary> {
        let session = self.provider.acquire().await?;
        let mut progress = Progress::default();

        let outcome = self.drive(session.as_ref(), &mut progress).await;

        self.provider.release(session).await;
        info!("Scraping completed. Browser session closed.");
        info!("Total records collected: {}", progress.records_collected);

        outcome.map(|stop_reason| RunSummary {
            pages_visited: progress.pages_visited,
            batches: progress.batches,
            records_collected: progress.records_collected,
            stop_reason,
        })
    }

    async fn drive(&self, session: &dyn Session, progress: &mut Progress) -> Result<StopReason> {
        let mut state = DriverState::FetchingPage(self.scraping.start_page);

        loop {
            if self.cancel.is_cancelled() && !matches!(state, DriverState::Done(_)) {
                info!("Scraping interrupted by user");
                state = DriverState::Done(StopReason::Cancelled);
            }

            state = match state {
                DriverState::FetchingPage(page) => self.fetch_page(session, page, progress).await?,
                DriverState::Dispatching { page, rows } => {
                    self.dispatch(page, &rows, progress).await?
                }
                DriverState::ProbingNext(page) => self.probe_next(session, page, progress).await?,
                DriverState::Done(reason) => return Ok(reason),
            };
        }
    }

    fn page_limit_reached(&self, progress: &Progress) -> bool {
        self.scraping
            .max_pages
            .is_some_and(|max| progress.pages_visited >= max)
    }

    async fn fetch_page(
        &self,
        session: &dyn Session,
        page: u32,
        progress: &Progress,
    ) -> Result<DriverState> {
        if self.page_limit_reached(progress) {
            info!("Reached page limit after {} pages", progress.pages_visited);
            return Ok(DriverState::Done(StopReason::PageLimit));
        }

        let url = build_listing_url(&self.contract, page)?;
        info!("Processing page {}...", page);

        if let Err(e) = session.navigate(&url).await {
            error!("Failed to load listing page {}: {}", url, e);
            return Ok(DriverState::Done(StopReason::NavigationFailed));
        }
        tokio::time::sleep(self.scraping.settle()).await;

        if let Err(e) = session
            .wait_for_selector(&self.contract.listing_item, self.scraping.wait_timeout())
            .await
        {
            if e.is_timeout() {
                info!("No more pages to scrape");
                return Ok(DriverState::Done(StopReason::PageTimedOut));
            }
            error!("Failed to read listing page {}: {}", url, e);
            return Ok(DriverState::Done(StopReason::NavigationFailed));
        }

        let html = session.content().await?;
        let rows = self.listing.parse(&html);
        info!("Found {} entries on page {}", rows.len(), page);

        if rows.is_empty() {
            info!("No more entries found");
            return Ok(DriverState::Done(StopReason::EndOfDirectory));
        }
        Ok(DriverState::Dispatching { page, rows })
    }

    async fn dispatch(
        &self,
        page: u32,
        rows: &[ListingRow],
        progress: &mut Progress,
    ) -> Result<DriverState> {
        let batch_size = self.scraping.batch_size.max(1);
        let total = rows.len();

        for (index, batch) in rows.chunks(batch_size).enumerate() {
            if self.cancel.is_cancelled() {
                info!("Scraping interrupted by user");
                return Ok(DriverState::Done(StopReason::Cancelled));
            }

            let start = index * batch_size;
            info!(
                "Processing elements {} to {} of {}",
                start + 1,
                start + batch.len(),
                total
            );
            let records = self.coordinator.run_batch(batch).await?;
            progress.batches += 1;
            progress.records_collected += records.len();
        }

        progress.pages_visited += 1;
        Ok(DriverState::ProbingNext(page))
    }

    async fn probe_next(
        &self,
        session: &dyn Session,
        page: u32,
        progress: &Progress,
    ) -> Result<DriverState> {
        if self.page_limit_reached(progress) {
            info!("Reached page limit after {} pages", progress.pages_visited);
            return Ok(DriverState::Done(StopReason::PageLimit));
        }

        let next = page + 1;
        let url = build_listing_url(&self.contract, next)?;
        if let Err(e) = session.navigate(&url).await {
            error!("Error checking next page: {}", e);
            return Ok(DriverState::Done(StopReason::NavigationFailed));
        }
        tokio::time::sleep(self.scraping.settle()).await;

        match session.count(&self.contract.listing_item).await {
            Ok(0) => {
                info!("No more entries found on next page");
                Ok(DriverState::Done(StopReason::EndOfDirectory))
            }
            Ok(_) => Ok(DriverState::FetchingPage(next)),
            Err(e) => {
                error!("Error checking next page: {}", e);
                Ok(DriverState::Done(StopReason::NavigationFailed))
            }
        }
    }
}
