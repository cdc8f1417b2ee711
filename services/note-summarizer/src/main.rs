//! Note summarizer CLI

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use note_summarizer::text::{strip_markdown, SAMPLE_NOTE};
use note_summarizer::{load_config, Config, SummaryMode};
use tracing::Level;

#[derive(Parser)]
#[command(name = "note-summarizer")]
#[command(about = "Summarize a clinical note with a remote summarization service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Output style
    #[arg(short, long, value_enum, default_value_t = SummaryMode::Summary)]
    mode: SummaryMode,

    /// Read the note from a file instead of stdin
    #[arg(short, long, conflicts_with = "sample")]
    file: Option<PathBuf>,

    /// Use the built-in sample note
    #[arg(long)]
    sample: bool,

    /// Strip markdown from the output
    #[arg(long)]
    plain: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        Config::default()
    };
    if let Some(server_url) = args.server_url {
        config.server.base_url = server_url;
    }

    let note = if args.sample {
        SAMPLE_NOTE.to_string()
    } else if let Some(path) = &args.file {
        std::fs::read_to_string(path)?
    } else {
        let mut note = String::new();
        std::io::stdin().read_to_string(&mut note)?;
        note
    };

    let client = note_summarizer::connect(&config)?;
    let output = client.generate(args.mode, &note).await?;

    if args.plain {
        println!("{}", strip_markdown(&output));
    } else {
        println!("{}", output);
    }

    Ok(())
}
