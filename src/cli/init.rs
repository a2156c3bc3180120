//! `knowbot init` command
//!
//! # Usage
//! ```bash
//! knowbot init                    # Initialize in current directory
//! knowbot init /path/to/project   # Initialize in specific path
//! knowbot init --global           # Initialize global ~/.knowbot
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::config::{Config, DIR_NAME};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Initialize global config (~/.knowbot)
    #[arg(long)]
    pub global: bool,

    /// Force re-initialization (keeps existing data)
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let dir = if args.global {
        Config::global_dir().context("Could not determine home directory")?
    } else {
        args.path
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DIR_NAME)
    };

    if is_initialized(&dir) && !args.force {
        bail!(
            "{} already exists. Use --force to reinitialize.",
            dir.display()
        );
    }

    println!("🚀 Initializing knowbot in: {}", dir.display());

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let config_path = dir.join("config.toml");
    Config::default().save_to(&config_path)?;

    // An empty collection is valid, but create the file so it is visible
    let data_path = dir.join("data.json");
    if !data_path.exists() {
        fs::write(&data_path, "[]\n")?;
    }

    println!("\n✅ Initialized knowbot");
    println!("   Config: {}", config_path.display());
    println!("   Data:   {}", data_path.display());
    println!("\nNext steps:");
    println!("  knowbot chat");
    println!("  knowbot search \"query\"");

    Ok(())
}

fn is_initialized(dir: &Path) -> bool {
    dir.join("config.toml").exists()
}
