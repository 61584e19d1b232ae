//! Configuration for messenger-store
//!
//! Settings are grouped per concern and loaded from JSON. Every field has a
//! default, so a partial file (or none at all) is valid.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub query: QueryConfig,
}

/// Where the store lives and how the connection is tuned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: PathBuf,

    /// Enable write-ahead logging on file-backed stores
    pub wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("messenger.db"),
            wal: true,
        }
    }
}

/// Shape of the synthetic data written into an empty store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedConfig {
    /// Number of chats, ids assigned 1..=chat_count
    pub chat_count: u32,

    /// Inclusive lower bound of messages per chat
    pub min_messages: u32,

    /// Exclusive upper bound of messages per chat
    pub max_messages: u32,

    /// Spacing between consecutive messages of one chat, in milliseconds
    pub step_ms: i64,

    /// Exclusive upper bound of the random unread counter
    pub max_unread: i64,

    /// Fixed RNG seed for reproducible content; entropy when absent
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            chat_count: 200,
            min_messages: 100,
            max_messages: 150,
            step_ms: 60_000,
            max_unread: 10,
            rng_seed: None,
        }
    }
}

/// Page size and search caps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QueryConfig {
    pub default_page_size: i64,
    pub search_limit: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: crate::storage::DEFAULT_PAGE_SIZE,
            search_limit: crate::storage::SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Reject settings the seeder or queries cannot honor
    pub fn validate(&self) -> Result<()> {
        self.seed.validate()?;

        if self.query.default_page_size <= 0 {
            return Err(StoreError::Config(
                "query.default_page_size must be positive".to_string(),
            ));
        }
        if self.query.search_limit <= 0 {
            return Err(StoreError::Config(
                "query.search_limit must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chat_count == 0 {
            return Err(StoreError::Config("seed.chat_count must be at least 1".to_string()));
        }
        if self.min_messages == 0 || self.min_messages >= self.max_messages {
            return Err(StoreError::Config(format!(
                "seed message range [{}, {}) is empty or starts at zero",
                self.min_messages, self.max_messages
            )));
        }
        if self.step_ms <= 0 {
            return Err(StoreError::Config("seed.step_ms must be positive".to_string()));
        }
        if self.step_ms.checked_mul(i64::from(self.max_messages)).is_none() {
            return Err(StoreError::Config(format!(
                "seed.step_ms {} times {} messages overflows an i64 timestamp",
                self.step_ms, self.max_messages
            )));
        }
        if self.max_unread <= 0 {
            return Err(StoreError::Config("seed.max_unread must be positive".to_string()));
        }
        Ok(())
    }
}
