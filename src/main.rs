//! Command line runner for a batch of usernames.
//!
//! Credentials come from the environment (or a `.env` file). Results are written
//! as JSON and/or CSV sheets; without any output flag the JSON goes to stdout.
//! Progress and status lines always go to stderr, so stdout stays valid JSON.

use anyhow::{bail, Context, Result};
use clap::Parser;
use ig_stats::{
    config::Config,
    presentation::{serialization::Serializer, tabular::write_workbook},
    transport::http_client::IgRestClient,
    utils::logger::setup_logger,
    AppError, BatchService, ProgressEvent,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ig_stats")]
#[command(about = "Profile and engagement statistics for Instagram accounts")]
struct Cli {
    /// Usernames to analyze (comma separated or one per argument)
    #[arg(value_delimiter = ',')]
    usernames: Vec<String>,

    /// Usernames to analyze, comma separated
    #[arg(long, value_delimiter = ',')]
    users: Vec<String>,

    /// Recent posts to collect per account
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
    posts: u32,

    /// Write the results as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the account/post sheets and pivots as CSV files into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logger();

    let cli = Cli::parse();
    let usernames: Vec<String> = cli.users.into_iter().chain(cli.usernames).collect();
    if usernames.iter().all(|u| u.trim().trim_matches('@').is_empty()) {
        bail!("No usernames given. Use --users a,b,c or pass them as arguments.");
    }

    let config = Config::new().context("Instagram credentials are not configured")?;
    info!("Configuration: {}", config);

    let client = Arc::new(IgRestClient::new(&config).context("Failed to build HTTP client")?);
    let cancel = CancellationToken::new();
    let service =
        Arc::new(BatchService::new(client, &config.scraper).with_cancellation(cancel.clone()));

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current request");
            interrupt.cancel();
        }
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = service.spawn(usernames, cli.posts as usize, tx);

    while let Some(event) = rx.recv().await {
        match event {
            ProgressEvent::Log(line) => eprintln!("{}", line),
            ProgressEvent::Results(records) => {
                let failed = records.iter().filter(|r| r.failure().is_some()).count();
                eprintln!(
                    "{} cuentas procesadas ({} con datos parciales).",
                    records.len(),
                    failed
                );
            }
        }
    }

    let records = handle.await.map_err(AppError::from)?;

    if let Some(path) = &cli.json {
        Serializer::save_batch(&records, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("JSON guardado en {}", path.display());
    }

    if let Some(dir) = &cli.csv_dir {
        let paths = write_workbook(&records, dir)
            .with_context(|| format!("Failed to export CSV into {}", dir.display()))?;
        for path in paths {
            eprintln!("CSV guardado en {}", path.display());
        }
    }

    if cli.json.is_none() && cli.csv_dir.is_none() {
        println!("{}", Serializer::to_json_pretty(&records)?);
    }

    Ok(())
}
