//! Harvester Core - Foundation crate for the directory harvester.
//!
//! This crate provides shared types, error handling, configuration management
//! and the page contract that all other harvester crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`contract`] - Selectors describing the target site, grouped in one value
//! - [`types`] - Domain types (`ListingEntry`, `DetailRecord`, `StoreRow`)
//!
//! # Example
//!
//! ```rust
//! use harvester_core::{AppConfig, DetailRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! let record = DetailRecord::new(0, "Jane Q. Public", "jane@example.com", "France");
//! assert_eq!(record.first_name, "Jane");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod contract;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, ScrapingConfig, StoreConfig};
pub use contract::{FieldSelector, PageContract, Presence};
pub use error::{ConfigError, ConfigResult, HarvesterError, Result};
pub use types::{derive_first_name, DetailRecord, ListingEntry, StoreRow};
