//! CLI application for collecting quarterly NBFC metrics from investor presentations.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::run;

/// lendscope - Extract quarterly lender metrics from BSE investor presentations
#[derive(Parser)]
#[command(name = "lendscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Roster key of a single company (default: whole roster)
    company: Option<String>,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Progress is narrated at INFO
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    run::run(cli.company.as_deref(), cli.config.as_deref()).await
}
