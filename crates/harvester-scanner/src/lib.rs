//! Harvester Scanner - directory traversal and profile extraction.
//!
//! This crate drives a paginated directory site: it walks listing pages,
//! fans each page out into bounded batches of concurrent profile extractions
//! (one isolated browser session per profile), and merges every batch into
//! the durable store before the next batch starts.
//!
//! # Features
//!
//! - Pagination state machine with end-of-directory probing
//! - Bounded per-batch concurrency with staggered worker starts
//! - Per-profile failure isolation: a timeout drops one record, not the batch
//! - Cooperative cancellation checked between pages and batches
//!
//! # Example
//!
//! ```rust,ignore
//! use harvester_browser::ChromeSessionProvider;
//! use harvester_core::AppConfig;
//! use harvester_scanner::PaginationDriver;
//! use std::sync::Arc;
//!
//! let config = AppConfig::default();
//! let provider = Arc::new(ChromeSessionProvider::new(config.browser.clone()));
//! let summary = PaginationDriver::new(provider, &config)?.run().await?;
//! println!("collected {}", summary.records_collected);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod batch;
#[allow(missing_docs)]
pub mod error;
pub mod extractor;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use batch::BatchCoordinator;
pub use error::{Result, ScanError};
pub use extractor::DetailExtractor;
pub use orchestrator::{DriverState, PaginationDriver, RunSummary, StopReason};
pub use parser::{ListingParser, ListingRow, ProfileFields, ProfileParser};
pub use url_builder::{build_listing_url, resolve_link};
