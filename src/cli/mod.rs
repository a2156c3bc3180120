//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod add;
pub mod chat;
pub mod config;
pub mod init;
pub mod search;
pub mod serve;
pub mod show;
pub mod utils;

/// knowbot - Conversational knowledge base
///
/// Search issues, notes and logic explanations by keyword or ID, and add or
/// edit them through guided dialogues.
#[derive(Parser, Debug)]
#[command(name = "knowbot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "KNOWBOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .knowbot directory
    Init(init::InitArgs),

    /// Add an entry without the wizard
    Add(add::AddArgs),

    /// Show an entry by ID
    Show(show::ShowArgs),

    /// Search entries by keyword or ID
    Search(search::SearchArgs),

    /// Interactive console conversation
    Chat(chat::ChatArgs),

    /// Serve the JSON-lines transport on STDIO
    Serve(serve::ServeArgs),

    /// Show configuration
    Config(config::ConfigArgs),
}
