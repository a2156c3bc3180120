//! `knowbot serve` command - JSON-lines transport on STDIO

use anyhow::Result;
use clap::Args;

use super::utils::open_store;
use crate::bot::{transport, Dispatcher};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the chunk size limit
    #[arg(long)]
    pub chunk_limit: Option<usize>,
}

pub async fn run(args: ServeArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if let Some(limit) = args.chunk_limit {
        config.format.chunk_limit = limit;
    }

    let store = open_store(&config);
    eprintln!("🚀 Serving knowbot on stdio");
    eprintln!("📂 Data: {}", store.path().display());

    transport::run_stdio(Dispatcher::with_config(store, &config)).await
}
