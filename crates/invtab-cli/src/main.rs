//! CLI application for extracting invoice line items from layout engine output.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, rows, text};

/// Invoice table extraction - turn layout engine table output into line items
#[derive(Parser)]
#[command(name = "invtab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract invoice rows from a saved result tree
    Rows(rows::RowsArgs),

    /// Extract raw text from a PDF
    Text(text::TextArgs),

    /// Extract rows from many result trees
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Rows(args) => rows::run(args, cli.config.as_deref()).await,
        Commands::Text(args) => text::run(args).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
