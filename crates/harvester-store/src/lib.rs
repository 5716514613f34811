//! Harvester Store - durable accumulation of harvested records.
//!
//! The store is a CSV file with exactly four columns (`Full Name`,
//! `First Name`, `Email`, `Country`) and one header row. Each batch is merged
//! with a read-modify-write cycle: existing rows are loaded, the batch is
//! appended, exact duplicates are removed and the file is replaced atomically.
//!
//! A single writer is assumed. Merges are issued one batch at a time by the
//! pagination driver, so the store takes no lock of its own.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{DirectoryStore, MergeReport};
