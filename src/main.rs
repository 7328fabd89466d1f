// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Archive CLI
//!
//! `export` walks the full activity history and fills the local archive;
//! `report` flattens the archive into a CSV summary table.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use strava_archive::{
    config::Config,
    services::{Exporter, RateLimiter, ReportBuilder, StravaClient},
    store::{ErrorLog, JsonStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strava-archive", about = "Export Strava activities and zones to local JSON files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export all activities and zones to the archive, skipping records
    /// that already exist.
    Export {
        /// Strava API bearer token
        #[arg(long, env = "STRAVA_ACCESS_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Flatten the archive into a CSV summary table.
    Report {
        /// Sport type to include
        #[arg(long, default_value = "Run")]
        sport_type: String,
        /// Output file (default: <archive>/strava_summary.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Export { token } => run_export(&config, token).await,
        Command::Report { sport_type, output } => run_report(&config, &sport_type, output).await,
    }
}

async fn run_export(config: &Config, token: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        archive = %config.archive_dir.display(),
        interval_secs = config.min_request_interval.as_secs_f64(),
        page_size = config.page_size,
        "Starting export"
    );

    let limiter = Arc::new(RateLimiter::new(config.min_request_interval));
    let client = StravaClient::new(config.base_url.clone(), token, limiter);
    let store = JsonStore::new(&config.archive_dir);
    let error_log = ErrorLog::new(config.archive_dir.join("error.log"));

    let exporter = Exporter::new(Arc::new(client), store, error_log, config.page_size);

    // Per-item failures are already in the summary and error.log; only
    // pagination and storage failures surface here as a non-zero exit.
    let summary = exporter.run().await?;

    tracing::info!(activities = summary.activities_seen(), "{}", summary);
    for failure in &summary.failures {
        tracing::warn!(
            activity_id = failure.activity_id,
            step = %failure.step,
            error = %failure.error,
            "Item was not exported; re-run to retry"
        );
    }

    Ok(())
}

async fn run_report(
    config: &Config,
    sport_type: &str,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::new(&config.archive_dir);
    let output = output.unwrap_or_else(|| config.archive_dir.join("strava_summary.csv"));

    let rows = ReportBuilder::new(store)
        .write_csv(sport_type, &output)
        .await?;

    tracing::info!(rows, output = %output.display(), "Report written");
    Ok(())
}

/// Initialize logging with an env-filter (RUST_LOG) override.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_archive=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
