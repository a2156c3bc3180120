//! Configuration module

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::format::DEFAULT_CHUNK_LIMIT;

/// Name of the per-project directory
pub const DIR_NAME: &str = ".knowbot";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Explicit collection file (overrides directory discovery)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Maximum characters per outbound chunk
    #[serde(default = "default_chunk_limit")]
    pub chunk_limit: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            chunk_limit: default_chunk_limit(),
        }
    }
}

fn default_chunk_limit() -> usize {
    DEFAULT_CHUNK_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Reserved text that cancels the active wizard
    #[serde(default = "default_cancel_token")]
    pub cancel_token: String,

    /// Drop wizards idle for longer than this (unset = never)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_mins: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cancel_token: default_cancel_token(),
            idle_timeout_mins: None,
        }
    }
}

fn default_cancel_token() -> String {
    "/cancel".to_string()
}

impl Config {
    /// Load config from an explicit file, or from default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        // Try local config first, then global
        if let Some(local) = Self::find_local(Some("config.toml")) {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_dir().map(|d| d.join("config.toml")) {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Walk up from the current directory looking for `.knowbot/`, or for
    /// a file inside it when `file` is given
    pub fn find_local(file: Option<&str>) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let dir = current.join(DIR_NAME);
            let candidate = match file {
                Some(name) => dir.join(name),
                None => dir,
            };
            if candidate.exists() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Global directory (~/.knowbot)
    pub fn global_dir() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|b| b.home_dir().join(DIR_NAME))
    }

    /// Collection file path with priority:
    /// 1. KNOWBOT_DATA env var
    /// 2. `store.path` from config
    /// 3. Local .knowbot/data.json (walking up from CWD)
    /// 4. Global ~/.knowbot/data.json
    pub fn data_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var("KNOWBOT_DATA") {
            return PathBuf::from(env_path);
        }

        if let Some(path) = &self.store.path {
            return path.clone();
        }

        if let Some(local) = Self::find_local(None) {
            return local.join("data.json");
        }

        if let Some(global) = Self::global_dir() {
            return global.join("data.json");
        }

        PathBuf::from(DIR_NAME).join("data.json")
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        if let Some(mins) = self.session.idle_timeout_mins {
            if minutes(mins).is_none() {
                bail!("session.idle_timeout_mins = {} is out of range", mins);
            }
        }
        Ok(())
    }

    /// Idle timeout as a chrono duration. Out-of-range values disable expiry.
    pub fn idle_timeout(&self) -> Option<chrono::Duration> {
        self.session.idle_timeout_mins.and_then(minutes)
    }
}

fn minutes(mins: u64) -> Option<chrono::Duration> {
    i64::try_from(mins)
        .ok()
        .and_then(chrono::Duration::try_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format.chunk_limit, 4000);
        assert_eq!(config.session.cancel_token, "/cancel");
        assert!(config.idle_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [session]
            idle_timeout_mins = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.session.cancel_token, "/cancel");
        assert_eq!(config.idle_timeout(), Some(chrono::Duration::minutes(15)));
        assert_eq!(config.format.chunk_limit, 4000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DIR_NAME).join("config.toml");

        let mut config = Config::default();
        config.format.chunk_limit = 1000;
        config.store.path = Some(PathBuf::from("/tmp/kb.json"));
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.format.chunk_limit, 1000);
        assert_eq!(loaded.store.path, Some(PathBuf::from("/tmp/kb.json")));
    }

    #[test]
    fn test_huge_idle_timeout_does_not_panic() {
        let mut config = Config::default();
        config.session.idle_timeout_mins = Some(1 << 60);
        assert!(config.idle_timeout().is_none());
        assert!(config.validate().is_err());

        config.session.idle_timeout_mins = Some(u64::MAX);
        assert!(config.idle_timeout().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_idle_timeout_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[session]\nidle_timeout_mins = 1152921504606846976\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("out of range"));

        std::fs::write(&path, "[session]\nidle_timeout_mins = 30\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.idle_timeout(), Some(chrono::Duration::minutes(30)));
    }
}
