//! Harvester command-line entry point.

mod cli;
mod signal;

use anyhow::Context;
use clap::Parser;
use harvester_browser::{ChromeSessionProvider, SessionProvider};
use harvester_scanner::PaginationDriver;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "info,harvester=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let config = args.config().context("failed to load configuration")?;
    if let Some(path) = args.write_config(&config).context("failed to write configuration")? {
        tracing::info!("Configuration written to {}", path.display());
        return Ok(());
    }
    tracing::info!(
        "Harvesting {} into {}",
        config.contract.base_url,
        config.store.path.display()
    );

    let provider: Arc<dyn SessionProvider> =
        Arc::new(ChromeSessionProvider::new(config.browser.clone()));

    let cancel = CancellationToken::new();
    let interrupts = signal::watch_interrupts(tokio::signal::ctrl_c, cancel.clone());
    tokio::spawn(async move {
        if interrupts.await == signal::Interrupt::Forced {
            tracing::error!("Second interrupt received, exiting without waiting for workers");
            std::process::exit(130);
        }
    });

    let summary = PaginationDriver::new(provider, &config)
        .context("invalid page contract")?
        .with_cancellation(cancel)
        .run()
        .await
        .context("harvest aborted")?;

    tracing::info!(
        "Run finished ({:?}): {} pages, {} batches, {} records",
        summary.stop_reason,
        summary.pages_visited,
        summary.batches,
        summary.records_collected
    );
    Ok(())
}
