//! Lunchline CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Write the default config
//! - `ask`      — One-shot menu lookup
//! - `chat`     — Interactive conversation in the terminal
//! - `doctor`   — Check config and the menu feed
//! - `config`   — Validate, show, or locate the config

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "lunchline",
    about = "Lunchline — school lunch menus as a conversation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration
    Onboard,

    /// Look up the menu for one day
    Ask {
        /// Day to look up (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Keep revealing categories until the menu is done
        #[arg(short, long)]
        all: bool,
    },

    /// Talk to the skill interactively
    Chat,

    /// Check configuration and feed health
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate the config
    Validate,
    /// Print the effective config as TOML
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so the conversation on stdout stays readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Ask { date, all } => commands::ask::run(date, all).await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
