//! Command-line flags and config assembly.

use clap::Parser;
use harvester_core::{AppConfig, HarvesterError, Result};
use std::path::PathBuf;

/// Crawl the directory and merge every profile into the CSV store.
#[derive(Debug, Parser)]
#[command(name = "harvester", version, about)]
pub struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store file to merge records into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Profiles extracted concurrently per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// First listing page to fetch
    #[arg(long)]
    pub start_page: Option<u32>,

    /// Stop after this many listing pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Show the browser windows
    #[arg(long)]
    pub headed: bool,

    /// Write the effective config to this file and exit without harvesting
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the effective config: file, then environment, then flags.
    pub fn config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => {
                return Err(HarvesterError::Validation(format!(
                    "config file {} does not exist",
                    path.display()
                )))
            }
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        config.apply_env_overrides();
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Save `config` to the `--write-config` path, if one was given.
    pub fn write_config(&self, config: &AppConfig) -> Result<Option<PathBuf>> {
        let Some(path) = &self.write_config else {
            return Ok(None);
        };
        config.save_to(path)?;
        Ok(Some(path.clone()))
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(output) = &self.output {
            config.store.path.clone_from(output);
        }
        if let Some(batch_size) = self.batch_size {
            config.scraping.batch_size = batch_size;
        }
        if let Some(start_page) = self.start_page {
            config.scraping.start_page = start_page;
        }
        if self.max_pages.is_some() {
            config.scraping.max_pages = self.max_pages;
        }
        if self.headed {
            config.browser.headless = false;
        }
    }
}
