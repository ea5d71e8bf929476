use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod output;

use config::{ConfigLoader, OutputFormat};

#[derive(Parser)]
#[command(name = "nexus", about = "Score stage diagnostics and compute the Nexus Index")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (overrides output.format from config)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a stage diagnostic submission
    Stage(commands::stage::StageArgs),
    /// Compute the Nexus Index of a student
    Index(commands::index::IndexArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ConfigLoader::load()?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    match cli.command {
        Commands::Stage(args) => commands::stage::run(args, &config),
        Commands::Index(args) => commands::index::run(args, &config).await,
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
