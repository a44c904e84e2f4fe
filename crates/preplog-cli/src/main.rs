//! CLI application for handwritten production-log OCR processing.

mod commands;
mod ocr_client;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process, send};

/// Production log OCR - extract (item, quantity) reports from prep-log photos
#[derive(Parser)]
#[command(name = "preplog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single log photo
    Process(process::ProcessArgs),

    /// Process multiple log photos into one report
    Batch(batch::BatchArgs),

    /// Email an exported CSV report
    Send(send::SendArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Credentials for the OCR and mail collaborators come from the
    // environment; a local .env is honored when present.
    let _ = dotenvy::dotenv();

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
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Send(args) => send::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
