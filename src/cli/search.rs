//! `knowbot search` command
//!
//! # Usage
//! ```bash
//! knowbot search "timeout"
//! knowbot search id:149
//! knowbot search auth --format json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::open_store;
use crate::config::Config;
use crate::core::entry::Entry;
use crate::core::{format, search};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword, or an ID (`149`, `id:149`, `id=149`)
    pub query: String,

    /// Output format (pretty, json)
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

pub fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let store = open_store(config);
    let entries = search::search(&store, &args.query)?;

    match args.format.as_str() {
        "json" => print_json(&entries)?,
        _ => print_pretty(&entries, config.format.chunk_limit),
    }

    Ok(())
}

fn print_pretty(entries: &[Entry], chunk_limit: usize) {
    if entries.is_empty() {
        println!("No results found.");
        return;
    }

    println!("\n📚 Found {} result(s):\n", entries.len());

    let chunks = format::format_entries(entries, chunk_limit);
    let total = chunks.len();
    for (i, chunk) in chunks.iter().enumerate() {
        if total > 1 {
            println!("{}", format!("── message {}/{} ──", i + 1, total).dimmed());
        }
        println!("{}\n", chunk);
    }
}

fn print_json(entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    println!("{}", json);
    Ok(())
}
