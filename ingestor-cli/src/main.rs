//! Ingestor CLI: pull a document collection into CSV train/test splits.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Ingestor: document-store ingestion and train/test splitting
#[derive(Parser, Debug)]
#[command(name = "ingestor", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (searched for ingestor.toml)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the ingestion pipeline and print the resulting artifact
    Ingest {
        /// Database to read from
        #[arg(long)]
        database: Option<String>,
        /// Collection to read from
        #[arg(long)]
        collection: Option<String>,
        /// Fraction of rows assigned to the test split
        #[arg(long)]
        ratio: Option<f64>,
        /// Seed for the split shuffle
        #[arg(long)]
        seed: Option<u64>,
        /// Root directory for run artifacts
        #[arg(long)]
        artifact_dir: Option<PathBuf>,
    },
    /// Upload a local CSV file into the configured collection
    Push {
        /// CSV file with a header row
        #[arg(short, long)]
        file: PathBuf,
        /// Target database
        #[arg(long)]
        database: Option<String>,
        /// Target collection
        #[arg(long)]
        collection: Option<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective configuration (connection string omitted)
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "ingestor", "ingestor")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "ingestor.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace, cli.config.as_deref()).await
}
