//! JSON-lines transport over STDIO
//!
//! One JSON object per line in each direction:
//!
//! ```text
//! → {"session": "42", "text": "/add"}
//! ← {"session": "42", "text": "🔹 Choose a kind ...", "menu": ["Issue", "Note", "Logic"]}
//! ```
//!
//! Lines that fail to parse get an `{"error": "..."}` line back and are
//! otherwise skipped. Messages are handled one at a time, in order.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::{Dispatcher, Reply};

/// Inbound message
#[derive(Debug, Deserialize)]
pub struct Inbound {
    pub session: String,
    pub text: String,
}

/// Outbound message
#[derive(Debug, Serialize)]
pub struct Outbound {
    pub session: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<String>>,
}

impl Outbound {
    fn new(session: &str, reply: Reply) -> Self {
        Self {
            session: session.to_string(),
            text: reply.text,
            menu: reply.menu,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorLine {
    error: String,
}

/// Slash commands understood on top of free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Edit,
    Cancel,
    Help,
}

impl Command {
    pub fn parse(text: &str, cancel_token: &str) -> Option<Self> {
        let text = text.trim();
        if text == cancel_token {
            return Some(Command::Cancel);
        }
        match text {
            "/add" => Some(Command::Add),
            "/edit" => Some(Command::Edit),
            "/cancel" => Some(Command::Cancel),
            "/help" | "/start" => Some(Command::Help),
            _ => None,
        }
    }
}

pub fn help_text(cancel_token: &str) -> String {
    format!(
        "🤖 Send a keyword or an ID (e.g. `149` or `id:149`) to search.\n\
         /add - add an Issue, Note or Logic entry\n\
         /edit - change one field of an entry\n\
         {} - abort the current wizard",
        cancel_token
    )
}

/// Route one message to the matching entry point
pub fn dispatch(dispatcher: &mut Dispatcher, session: &str, text: &str) -> Vec<Reply> {
    match Command::parse(text, dispatcher.cancel_token()) {
        Some(Command::Add) => dispatcher.begin_create(session),
        Some(Command::Edit) => dispatcher.begin_edit(session),
        Some(Command::Cancel) => dispatcher.cancel(session),
        Some(Command::Help) => vec![Reply::text(help_text(dispatcher.cancel_token()))],
        None => dispatcher.handle_text(session, text),
    }
}

/// Run the transport until STDIN closes
pub async fn run_stdio(mut dispatcher: Dispatcher) -> Result<()> {
    info!(store = %dispatcher.store().path().display(), "knowbot transport starting");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let preview: String = line.chars().take(100).collect();
        debug!(line = %preview, "Received");

        let out: Vec<String> = match serde_json::from_str::<Inbound>(&line) {
            Ok(msg) => dispatch(&mut dispatcher, &msg.session, &msg.text)
                .into_iter()
                .map(|reply| serde_json::to_string(&Outbound::new(&msg.session, reply)))
                .collect::<serde_json::Result<_>>()?,
            Err(e) => {
                warn!(error = %e, "Unparseable inbound line");
                vec![serde_json::to_string(&ErrorLine {
                    error: format!("Parse error: {}", e),
                })?]
            }
        };

        for json in out {
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.flush().await?;
    }

    info!("knowbot transport stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::EntryStore;
    use tempfile::tempdir;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(" /add ", "/cancel"), Some(Command::Add));
        assert_eq!(Command::parse("/edit", "/cancel"), Some(Command::Edit));
        assert_eq!(Command::parse("/start", "/cancel"), Some(Command::Help));
        assert_eq!(Command::parse("stop", "stop"), Some(Command::Cancel));
        assert_eq!(Command::parse("add", "/cancel"), None);
    }

    #[test]
    fn test_dispatch_full_conversation() {
        let dir = tempdir().unwrap();
        let mut d = Dispatcher::new(EntryStore::open(dir.path().join("data.json")));

        let replies = dispatch(&mut d, "s", "/add");
        assert!(replies[0].menu.is_some());
        for text in ["Logic", "Sync", "pull; merge; push"] {
            dispatch(&mut d, "s", text);
        }

        let replies = dispatch(&mut d, "s", "id:1");
        assert!(replies[0].text.contains(" - merge"));

        dispatch(&mut d, "s", "/edit");
        dispatch(&mut d, "s", "1");
        dispatch(&mut d, "s", "Module");
        let replies = dispatch(&mut d, "s", "Replication");
        assert!(replies[0].text.contains("Module = Replication"));
    }

    #[test]
    fn test_outbound_serialization() {
        let json = serde_json::to_string(&Outbound::new("7", Reply::text("hi"))).unwrap();
        assert_eq!(json, r#"{"session":"7","text":"hi"}"#);

        let json = serde_json::to_string(&Outbound::new(
            "7",
            Reply::with_menu("pick", vec!["A".into()]),
        ))
        .unwrap();
        assert_eq!(json, r#"{"session":"7","text":"pick","menu":["A"]}"#);
    }
}
