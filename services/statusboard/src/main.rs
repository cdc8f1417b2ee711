//! Statusboard CLI
//!
//! Command-line interface for the endpoint status dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use statusboard::endpoint::NewEndpoint;
use statusboard::{load_config, Config, Statusboard};
use tracing::Level;

#[derive(Parser)]
#[command(name = "statusboard")]
#[command(about = "Endpoint status dashboard with periodic batch checks")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Auto-refresh interval in seconds (overrides config file)
    #[arg(long)]
    interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render the dashboard and keep it refreshed (default)
    Watch,
    /// Fetch and render the endpoint list once
    List,
    /// Check all endpoints once and render the result
    Check,
    /// Register a new endpoint with the backend
    Add {
        /// URL to monitor
        #[arg(long)]
        url: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Expected HTTP status code
        #[arg(long, default_value_t = 200)]
        expected_status: u16,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, backend_url={:?}, interval={:?}, log_level={:?}",
        args.config,
        args.backend_url,
        args.interval,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(backend_url) = args.backend_url {
        config.backend.base_url = backend_url;
    }
    if let Some(interval) = args.interval {
        config.refresh.interval_seconds = interval;
    }

    tracing::debug!(
        "Backend: {}, refresh every {}s (enabled={})",
        config.backend.base_url,
        config.refresh.interval_seconds,
        config.refresh.enabled
    );

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => statusboard::run(config).await?,
        Command::List => Statusboard::new(config)?.list().await,
        Command::Check => {
            let results = Statusboard::new(config)?.check().await;
            tracing::info!("Checked {} endpoints", results.len());
        }
        Command::Add {
            url,
            name,
            expected_status,
        } => {
            let endpoint = Statusboard::new(config)?
                .add(&NewEndpoint {
                    url,
                    name,
                    expected_status,
                })
                .await?;
            tracing::info!("Added endpoint {} ({})", endpoint.name, endpoint.id);
        }
    }

    Ok(())
}
