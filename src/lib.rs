//! knowbot - Conversational knowledge base
//!
//! Stores short structured records (issues, notes, logic explanations) in a
//! JSON file and serves them through a chat-style interface: free text is a
//! search, `/add` and `/edit` start guided wizards.
//!
//! ## Key Concepts
//!
//! - **Entry**: one record, kind Issue / Note / Logic, integer ID
//! - **Whole-file store**: loaded before and rewritten after every operation
//! - **Session**: per-user conversation owning at most one active wizard
//! - **Chunk**: one outbound message, bounded by the transport size limit

pub mod bot;
pub mod cli;
pub mod config;
pub mod core;

pub use bot::{Dispatcher, Reply};
pub use crate::core::entry::{Entry, EntryField, Kind};
pub use crate::core::store::{EntryStore, StoreError};
