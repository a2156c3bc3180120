//! knowbot CLI - Entry point
//!
//! Usage: knowbot <command> [options]

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use knowbot::cli::{Cli, Commands};
use knowbot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, stdout belongs to command output)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        // Init writes the config, everything else reads it
        Commands::Init(args) => knowbot::cli::init::run(args),
        command => {
            let config = Config::load(cli.config.as_deref())?;
            run(command, &config, cli.config.as_deref()).await
        }
    }
}

async fn run(command: Commands, config: &Config, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Init(args) => knowbot::cli::init::run(args),
        Commands::Add(args) => knowbot::cli::add::run(args, config),
        Commands::Show(args) => knowbot::cli::show::run(args, config),
        Commands::Search(args) => knowbot::cli::search::run(args, config),
        Commands::Chat(args) => knowbot::cli::chat::run(args, config),
        Commands::Serve(args) => knowbot::cli::serve::run(args, config).await,
        Commands::Config(args) => knowbot::cli::config::run(args, config, config_path),
    }
}
