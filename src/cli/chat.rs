//! `knowbot chat` command
//!
//! Talks to the dispatcher from the terminal, one line per message. Useful
//! for trying the wizards without a chat transport.
//!
//! # Usage
//! ```bash
//! knowbot chat
//! > /add
//! 🔹 Choose a kind (Issue / Note / Logic):
//!    [Issue | Note | Logic]
//! ```

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::open_store;
use crate::bot::{transport, Dispatcher, Reply};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Session id to use for this conversation
    #[arg(long, default_value = "console")]
    pub session: String,
}

pub fn run(args: ChatArgs, config: &Config) -> Result<()> {
    let mut dispatcher = Dispatcher::with_config(open_store(config), config);

    println!("{}", transport::help_text(dispatcher.cancel_token()).dimmed());
    println!("{}", "/quit - leave".dimmed());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("{} ", ">".green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text, "/quit" | "/exit") {
            break;
        }

        for reply in transport::dispatch(&mut dispatcher, &args.session, text) {
            print_reply(&reply);
        }
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    println!("{}", reply.text);
    if let Some(menu) = &reply.menu {
        println!("   {}", format!("[{}]", menu.join(" | ")).cyan());
    }
    println!();
}
