//! Session map and message dispatch
//!
//! The dispatcher owns every session's wizard state, keyed by session id.
//! Wizards are taken out of the map for a step and put back only if they
//! are still active, so a finished or cancelled wizard leaves nothing
//! behind.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};

use super::create::CreateWizard;
use super::edit::EditWizard;
use super::{Flow, Reply, LOAD_FAILED};
use crate::config::Config;
use crate::core::format;
use crate::core::search;
use crate::core::store::EntryStore;

/// The wizard a session is currently in
#[derive(Debug, Clone)]
pub enum Wizard {
    Create(CreateWizard),
    Edit(EditWizard),
}

impl Wizard {
    fn name(&self) -> &'static str {
        match self {
            Wizard::Create(_) => "create",
            Wizard::Edit(_) => "edit",
        }
    }

    /// Run one step; `None` means the wizard is over
    fn handle(self, text: &str, store: &EntryStore) -> (Option<Wizard>, Reply) {
        match self {
            Wizard::Create(w) => match w.handle(text, store) {
                Flow::Continue(next, reply) => (Some(Wizard::Create(next)), reply),
                Flow::Done(reply) => (None, reply),
            },
            Wizard::Edit(w) => match w.handle(text, store) {
                Flow::Continue(next, reply) => (Some(Wizard::Edit(next)), reply),
                Flow::Done(reply) => (None, reply),
            },
        }
    }
}

#[derive(Debug)]
struct Session {
    wizard: Wizard,
    last_seen: DateTime<Utc>,
}

/// Routes messages for all sessions
pub struct Dispatcher {
    store: EntryStore,
    sessions: HashMap<String, Session>,
    chunk_limit: usize,
    cancel_token: String,
    idle_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(store: EntryStore) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: EntryStore, config: &Config) -> Self {
        Self {
            store,
            sessions: HashMap::new(),
            chunk_limit: config.format.chunk_limit,
            cancel_token: config.session.cancel_token.clone(),
            idle_timeout: config.idle_timeout(),
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn cancel_token(&self) -> &str {
        &self.cancel_token
    }

    /// Active wizard for a session, if any
    pub fn active(&self, session: &str) -> Option<&Wizard> {
        self.sessions.get(session).map(|s| &s.wizard)
    }

    fn activate(&mut self, session: &str, wizard: Wizard) {
        info!(session, wizard = wizard.name(), "Wizard started");
        let previous = self.sessions.insert(
            session.to_string(),
            Session {
                wizard,
                last_seen: Utc::now(),
            },
        );
        if let Some(old) = previous {
            debug!(session, wizard = old.wizard.name(), "Discarded previous wizard");
        }
    }

    /// Begin the creation wizard, replacing any active one
    pub fn begin_create(&mut self, session: &str) -> Vec<Reply> {
        let (wizard, prompt) = CreateWizard::start();
        self.activate(session, Wizard::Create(wizard));
        vec![prompt]
    }

    /// Begin the edit wizard, replacing any active one
    pub fn begin_edit(&mut self, session: &str) -> Vec<Reply> {
        let (wizard, prompt) = EditWizard::start();
        self.activate(session, Wizard::Edit(wizard));
        vec![prompt]
    }

    /// Drop the active wizard without saving anything
    pub fn cancel(&mut self, session: &str) -> Vec<Reply> {
        match self.sessions.remove(session) {
            Some(s) => {
                info!(session, wizard = s.wizard.name(), "Wizard cancelled");
                vec![Reply::text("🚫 Cancelled. Nothing was saved.")]
            }
            None => vec![Reply::text("Nothing to cancel.")],
        }
    }

    /// Free text: feed the active wizard, or search
    pub fn handle_text(&mut self, session: &str, text: &str) -> Vec<Reply> {
        self.expire_idle(Utc::now());

        if text.trim() == self.cancel_token {
            return self.cancel(session);
        }

        match self.sessions.remove(session) {
            Some(active) => {
                let (next, reply) = active.wizard.handle(text, &self.store);
                match next {
                    Some(wizard) => {
                        self.sessions.insert(
                            session.to_string(),
                            Session {
                                wizard,
                                last_seen: Utc::now(),
                            },
                        );
                    }
                    None => info!(session, "Wizard finished"),
                }
                self.fit(reply)
            }
            None => self.search(text),
        }
    }

    /// Resolve a query and format the results into chunks
    pub fn search(&self, text: &str) -> Vec<Reply> {
        match search::search(&self.store, text) {
            Ok(entries) if entries.is_empty() => {
                vec![Reply::text("❌ No matching entries found.")]
            }
            Ok(entries) => format::format_entries(&entries, self.chunk_limit)
                .into_iter()
                .map(Reply::text)
                .collect(),
            Err(e) => {
                error!(error = %e, "Search failed");
                vec![Reply::text(LOAD_FAILED)]
            }
        }
    }

    /// Split a wizard reply into chunks under the limit; the menu goes
    /// with the last one
    fn fit(&self, reply: Reply) -> Vec<Reply> {
        let mut chunks = format::split_text(&reply.text, self.chunk_limit);
        let last = chunks.pop().unwrap_or_default();
        let mut replies: Vec<Reply> = chunks.into_iter().map(Reply::text).collect();
        replies.push(Reply {
            text: last,
            menu: reply.menu,
        });
        replies
    }

    /// Drop wizards idle longer than the configured timeout.
    /// Returns how many were dropped.
    pub fn expire_idle(&mut self, now: DateTime<Utc>) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };

        let before = self.sessions.len();
        self.sessions.retain(|id, s| {
            let keep = now - s.last_seen <= timeout;
            if !keep {
                info!(session = %id, wizard = s.wizard.name(), "Wizard expired");
            }
            keep
        });
        before - self.sessions.len()
    }
}
