//! ghfolio - rotating GitHub portfolio in the terminal
//!
//! Fetches a profile and its repositories once, orders them by stars, and
//! prints a window that advances on a timer until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use ghfolio_core::{FolioConfig, Portfolio, RotationDriver, RotationEngine};

mod args;
mod logging;
mod render;

use args::Args;
use render::{ProfileView, WindowView};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    logging::init(&args.log_level, args.log_json)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ghfolio");

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        FolioConfig::load_from(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        FolioConfig::load().context("failed to load configuration")?
    };
    args.apply(&mut config);
    config.validate().context("invalid command-line override")?;

    tracing::debug!(
        subject = %config.profile.subject,
        limit = config.profile.repo_limit,
        window = config.rotation.window_size,
        "configuration loaded"
    );

    let cache = ghfolio_core::connect(&config).context("failed to set up GitHub client")?;
    let portfolio =
        Portfolio::load(&cache, &config.profile.subject, config.profile.repo_limit).await;

    println!("{}", ProfileView::new(&portfolio.profile, portfolio.degraded));

    let engine = RotationEngine::with_items(portfolio.repositories, config.rotation.window_size);
    if engine.is_empty() {
        println!("{}", WindowView::new(&engine.snapshot()));
        return Ok(());
    }

    let handle = RotationDriver::spawn(engine, config.rotation.interval());
    let mut updates = handle.subscribe();
    let first = updates.borrow_and_update().clone();
    println!("{}", WindowView::new(&first));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", WindowView::new(&snapshot));
                if args.cycles > 0 && snapshot.auto_advances >= args.cycles {
                    break;
                }
            }
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    handle.shutdown().await;
    tracing::info!("ghfolio shutdown complete");
    Ok(())
}
