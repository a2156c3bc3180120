//! `knowbot config` command
//!
//! # Usage
//! ```bash
//! knowbot config          # Show effective config
//! knowbot config --path   # Show where config and data are read from
//! ```

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show config and data file locations
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, config: &Config, explicit: Option<&Path>) -> Result<()> {
    if args.path {
        let active = explicit
            .map(Path::to_path_buf)
            .or_else(|| Config::find_local(Some("config.toml")))
            .or_else(|| {
                Config::global_dir()
                    .map(|d| d.join("config.toml"))
                    .filter(|p| p.exists())
            });

        match active {
            Some(p) => println!("✓ Config: {}", p.display()),
            None => println!("⚠ No config file found, using defaults"),
        }
        println!("  Data:   {}", config.data_path().display());
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
