// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! acthub - Campaign Action Hub.
//!
//! Binary entry point: polls a campaign mailbox into actionable posts and
//! serves the dashboard API over them.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod ingest;
mod seed;
mod serve;
mod store;

use clap::{Parser, Subcommand};

/// Campaign Action Hub: email ingestion, classification, and dashboard API.
#[derive(Parser, Debug)]
#[command(name = "acthub", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file, replacing the XDG lookup. Environment
    /// overrides still apply.
    #[arg(long, short, global = true, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the dashboard API server.
    Serve,
    /// Poll the mailbox once and ingest unseen messages. Run from cron.
    Ingest,
    /// Insert a set of demo posts for dashboard development.
    Seed,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => acthub_config::load_and_validate_path(path),
        None => acthub_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            acthub_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.hub.log_level);

    let result = match cli.command {
        Commands::Serve => serve::run(&config).await,
        Commands::Ingest => ingest::run(&config).await,
        Commands::Seed => seed::run(&config).await,
    };

    if let Err(err) = result {
        tracing::error!(stage = err.stage(), error = %err, "command failed");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("acthub={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
