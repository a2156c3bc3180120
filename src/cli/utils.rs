//! CLI utility functions

use tracing::debug;

use crate::config::Config;
use crate::core::store::EntryStore;

/// Open the store at the configured data path
pub fn open_store(config: &Config) -> EntryStore {
    let path = config.data_path();
    debug!(path = %path.display(), "Using collection file");
    EntryStore::open(path)
}
