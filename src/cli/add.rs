//! `knowbot add` command
//!
//! Adds an entry in one go, without the chat wizard.
//!
//! # Usage
//! ```bash
//! knowbot add --kind note --module Auth --description "Tokens last 1h"
//! knowbot add --kind issue --module Auth --description "Stale cookie" \
//!     --name "Login loop" --issue-version 2.4.1 --solution "Clear cookies"
//! ```

use anyhow::{bail, Result};
use clap::Args;

use super::utils::open_store;
use crate::config::Config;
use crate::core::entry::{Entry, Kind};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Entry kind (issue, note, logic)
    #[arg(short, long)]
    pub kind: String,

    /// Module the entry belongs to
    #[arg(short, long)]
    pub module: String,

    /// Description (cause for issues, `;` separated points for logic)
    #[arg(short, long)]
    pub description: String,

    /// Issue name (issues only)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Affected version (issues only)
    #[arg(id = "issue_version", long = "issue-version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Solution (issues only)
    #[arg(short, long)]
    pub solution: Option<String>,
}

/// Validate arguments and build the unsaved entry
pub fn build_entry(args: AddArgs) -> Result<Entry> {
    let Some(kind) = Kind::known(&args.kind) else {
        bail!("Unknown kind '{}'. Use issue, note or logic.", args.kind);
    };

    if args.module.trim().is_empty() {
        bail!("Module cannot be empty");
    }

    if kind.is_issue() {
        let (Some(name), Some(version), Some(solution)) = (args.name, args.version, args.solution)
        else {
            bail!("Issues need --name, --issue-version and --solution");
        };
        return Ok(Entry::issue(version, name, args.module, args.description, solution));
    }

    if args.name.is_some() || args.version.is_some() || args.solution.is_some() {
        bail!("--name, --issue-version and --solution only apply to issues");
    }

    Ok(Entry::new(kind, args.module, args.description))
}

pub fn run(args: AddArgs, config: &Config) -> Result<()> {
    let entry = build_entry(args)?;

    let store = open_store(config);
    let saved = store.append(entry)?;

    println!("✅ Entry added: #{}", saved.id);
    println!("   Kind:   {}", saved.kind);
    println!("   Module: {}", saved.module);

    Ok(())
}
