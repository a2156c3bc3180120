//! `knowbot show` command

use anyhow::{bail, Result};
use clap::Args;

use super::utils::open_store;
use crate::config::Config;
use crate::core::format;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entry ID
    pub id: u64,

    /// Print the stored JSON instead of the chat rendering
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let store = open_store(config);

    let Some(entry) = store.find_by_id(args.id)? else {
        bail!("Entry not found: {}", args.id);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", format::render(&entry));
    }

    Ok(())
}
