//! Core module - Business logic
//!
//! Entries, their JSON store, the query resolver and the response formatter.

pub mod entry;
pub mod format;
pub mod search;
pub mod store;

pub use entry::{Entry, EntryField, Kind};
pub use store::{EntryStore, StoreError};
