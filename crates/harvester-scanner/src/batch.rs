//! Bounded fan-out of one batch of listing rows.

use crate::error::{Result, ScanError};
use crate::extractor::DetailExtractor;
use crate::parser::ListingRow;
use futures::stream::{FuturesUnordered, StreamExt};
use harvester_core::DetailRecord;
use harvester_store::DirectoryStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Runs one extraction worker per dispatchable row and persists the results.
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    extractor: Arc<DetailExtractor>,
    store: DirectoryStore,
    stagger: Duration,
}

impl BatchCoordinator {
    /// Create a coordinator. `stagger` is the pause between worker starts.
    #[must_use]
    pub fn new(extractor: Arc<DetailExtractor>, store: DirectoryStore, stagger: Duration) -> Self {
        Self {
            extractor,
            store,
            stagger,
        }
    }

    /// Extract every row that has a detail URL, then merge the collected
    /// records into the store.
    ///
    /// Each row's ordinal is its position within `rows`, skipped rows included.
    /// Individual extraction failures only shrink the result; the batch fails
    /// as a whole only when persisting the records fails.
    pub async fn run_batch(&self, rows: &[ListingRow]) -> Result<Vec<DetailRecord>> {
        let mut workers = FuturesUnordered::new();

        for (ordinal, row) in rows.iter().enumerate() {
            let entry = match row {
                ListingRow::Entry(entry) => entry,
                ListingRow::Malformed { reason } => {
                    warn!("Error extracting data from listing element: {}", reason);
                    continue;
                }
            };
            let Some(url) = entry.detail_url.clone() else {
                warn!("No URL found for {}", entry.display_name);
                continue;
            };

            if !workers.is_empty() {
                tokio::time::sleep(self.stagger).await;
            }

            let extractor = Arc::clone(&self.extractor);
            let full_name = entry.display_name.clone();
            workers.push(tokio::spawn(async move {
                extractor.extract(&url, &full_name, ordinal).await
            }));
        }

        let dispatched = workers.len();
        let mut records = Vec::with_capacity(dispatched);
        while let Some(joined) = workers.next().await {
            match joined {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => error!("Extraction worker failed: {}", e),
            }
        }
        debug!("Batch finished: {} of {} workers produced a record", records.len(), dispatched);

        if !records.is_empty() {
            self.persist(records.clone()).await?;
        }
        Ok(records)
    }

    async fn persist(&self, records: Vec<DetailRecord>) -> Result<()> {
        let store = self.store.clone();
        let report = tokio::task::spawn_blocking(move || store.merge(records))
            .await
            .map_err(|e| ScanError::StoreTask(e.to_string()))??;

        if let Some(report) = report {
            info!(
                "Stored {} new rows ({} already present)",
                report.added, report.existing
            );
        }
        Ok(())
    }
}
