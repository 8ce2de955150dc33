//! Rudder CLI — the main entry point.
//!
//! Commands:
//! - `steering list`    — Show steering files in load order with their status
//! - `steering explain` — Explain discovery, budget and per-file decisions
//! - `prompt`           — Print the merged instruction chain
//! - `status`           — Show resolved paths and settings
//! - `onboard`          — Initialize the rudder home
//! - `config`           — Show, locate or validate the configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::context::Overrides;

#[derive(Parser)]
#[command(
    name = "rudder",
    about = "Rudder — steering file aggregation for agent instructions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Resolve the project from this directory instead of the current one
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Disable steering for this invocation
    #[arg(long, global = true)]
    no_steering: bool,

    /// Override the steering byte budget for this invocation
    #[arg(long, global = true, value_name = "N")]
    max_bytes: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect steering files
    Steering {
        #[command(subcommand)]
        action: SteeringAction,
    },

    /// Print the merged instruction chain
    Prompt,

    /// Show resolved paths and settings
    Status,

    /// Initialize the rudder home and default configuration
    Onboard,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SteeringAction {
    /// List steering files in load order
    List {
        /// Emit the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain discovery, budget and every omission or truncation
    Explain,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Validate the configuration file and environment overrides
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing on stderr so command output stays clean
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let overrides = Overrides {
        cwd: cli.cwd,
        no_steering: cli.no_steering,
        max_bytes: cli.max_bytes,
    };

    match cli.command {
        Commands::Steering { action } => match action {
            SteeringAction::List { json } => commands::steering::list(&overrides, json).await?,
            SteeringAction::Explain => commands::steering::explain(&overrides).await?,
        },
        Commands::Prompt => commands::prompt::run(&overrides).await?,
        Commands::Status => commands::status::run(&overrides).await?,
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&overrides).await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
    }

    Ok(())
}
