//! Configuration management for the harvester.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The resulting [`AppConfig`] is built once
//! by the binary and handed to each component at construction time.

use crate::contract::PageContract;
use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/harvester/config.toml` (or platform equivalent)
/// unless a path is given explicitly. Missing files and missing sections fall
/// back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pagination, batching and timing
    pub scraping: ScrapingConfig,
    /// Browser session settings
    pub browser: BrowserConfig,
    /// Durable store settings
    pub store: StoreConfig,
    /// Selectors and URL layout of the target site
    pub contract: PageContract,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    ///
    /// Supports the following environment variables:
    /// - `HARVESTER_BATCH_SIZE`: Override the concurrency batch size
    /// - `HARVESTER_HEADLESS`: Override browser headless mode (true/false)
    /// - `HARVESTER_STORE_PATH`: Override the durable store path
    /// - `HARVESTER_BASE_URL`: Override the target site root
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("HARVESTER_BATCH_SIZE") {
            if let Ok(size) = val.parse() {
                self.scraping.batch_size = size;
                tracing::debug!("Override scraping.batch_size from env: {}", size);
            }
        }

        if let Some(val) = lookup("HARVESTER_HEADLESS") {
            if let Ok(headless) = val.parse() {
                self.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Some(val) = lookup("HARVESTER_STORE_PATH") {
            if !val.is_empty() {
                tracing::debug!("Override store.path from env: {}", val);
                self.store.path = PathBuf::from(val);
            }
        }

        if let Some(val) = lookup("HARVESTER_BASE_URL") {
            if !val.is_empty() {
                tracing::debug!("Override contract.base_url from env: {}", val);
                self.contract.base_url = val;
            }
        }
    }

    /// Check values that would make a run meaningless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scraping.batch_size == 0 {
            return Err(invalid("scraping.batch_size", "must be at least 1"));
        }
        if self.contract.base_url.trim().is_empty() {
            return Err(invalid("contract.base_url", "must not be empty"));
        }
        if !self.contract.listing_path.contains("{page}") {
            return Err(invalid(
                "contract.listing_path",
                "must contain the {page} placeholder",
            ));
        }
        for (field, selector) in self.contract.selectors() {
            if selector.trim().is_empty() {
                return Err(invalid(field, "selector must not be empty"));
            }
        }
        Ok(())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/harvester/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("rs", "harvester", "harvester").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Pagination, batching and timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Listing entries processed concurrently per batch
    pub batch_size: usize,
    /// Pause between starting two workers, in milliseconds
    pub stagger_ms: u64,
    /// Settle delay after each navigation, in milliseconds
    pub settle_ms: u64,
    /// Upper bound when waiting for a marker element, in seconds
    pub wait_timeout_secs: u64,
    /// First listing page to visit
    pub start_page: u32,
    /// Stop after this many pages (unbounded when unset)
    pub max_pages: Option<u32>,
}

impl ScrapingConfig {
    /// Worker start stagger.
    #[must_use]
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    /// Page settle delay.
    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Element wait timeout.
    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            batch_size: 7,
            stagger_ms: 100,
            settle_ms: 1500,
            wait_timeout_secs: 10,
            start_page: 0,
            max_pages: None,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Explicit Chrome/Chromium executable; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
    /// Pick a random desktop user agent and viewport per session
    pub randomize_fingerprint: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            chrome_executable: None,
            randomize_fingerprint: true,
        }
    }
}

/// Durable store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the CSV store
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("notaries_data.csv"),
        }
    }
}
