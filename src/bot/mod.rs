//! Bot - Conversational layer
//!
//! Turns `(session, text)` messages into replies. Free text is a search
//! unless the session has an active wizard, in which case the wizard's
//! current step consumes it.
//!
//! # Wizards
//! - `create` - Issue / Note / Logic creation
//! - `edit` - change one field of an existing entry
//!
//! Both are closed state enums; every step consumes the wizard and returns
//! either the next wizard value or a final reply (`Flow`).

pub mod create;
pub mod edit;
pub mod session;
pub mod transport;

use serde::Serialize;

pub use session::Dispatcher;

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,

    /// Constrained choices for the user (rendered as a keyboard by the transport)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<String>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Vec<String>) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }
}

/// Result of feeding one message to a wizard
#[derive(Debug)]
pub enum Flow<W> {
    /// Wizard stays active in its (possibly new) state
    Continue(W, Reply),
    /// Wizard finished (saved, not found or implicitly cancelled)
    Done(Reply),
}

/// Shown when the store fails mid-wizard; the draft is kept
pub(crate) const SAVE_FAILED: &str =
    "⚠️ Could not save to the knowledge base. Your answers are kept: send the last value again to retry.";

/// Shown when the store cannot be read
pub(crate) const LOAD_FAILED: &str =
    "⚠️ The knowledge base is unavailable right now. Please try again later.";
