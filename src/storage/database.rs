//! SQLite database operations for messenger-store
//!
//! This module owns the connection and the schema manager. Mutations and
//! queries live in sibling modules as further `impl Database` blocks.

use crate::config::{Config, QueryConfig};
use crate::error::{Result, StoreError};
use crate::storage::schema::*;
use crate::storage::{Chat, Message};
use rusqlite::{Connection, Row, params};
use std::path::Path;

/// Database connection and operations
///
/// One instance per process, passed by reference to every operation.
pub struct Database {
    pub(crate) conn: Connection,
    pub(crate) query: QueryConfig,
    wal: bool,
    in_memory: bool,
}

impl Database {
    /// Open (or create) the store at `path` and provision the schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| StoreError::Provisioning(format!("Failed to open database: {}", e)))?;

        let mut db = Self {
            conn,
            query: QueryConfig::default(),
            wal: true,
            in_memory: false,
        };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Provisioning(format!("Failed to create in-memory database: {}", e))
        })?;

        let mut db = Self {
            conn,
            query: QueryConfig::default(),
            wal: false,
            in_memory: true,
        };
        db.initialize()?;
        Ok(db)
    }

    /// Open the store described by `config.database` with its query settings
    pub fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let conn = Connection::open(&config.database.path)
            .map_err(|e| StoreError::Provisioning(format!("Failed to open database: {}", e)))?;

        let mut db = Self {
            conn,
            query: config.query.clone(),
            wal: config.database.wal,
            in_memory: false,
        };
        db.initialize()?;
        Ok(db)
    }

    /// Provision tables and indexes. Safe to call on every start.
    pub fn initialize(&mut self) -> Result<()> {
        if self.wal && !self.in_memory {
            let mode: String = self
                .conn
                .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
                .map_err(|e| StoreError::Provisioning(format!("Failed to enable WAL mode: {}", e)))?;
            log::debug!("journal_mode = {}", mode);
        }

        self.conn
            .pragma_update(None, "foreign_keys", true)
            .map_err(|e| StoreError::Provisioning(format!("Failed to enable foreign keys: {}", e)))?;

        // Chats first: messages reference them
        self.conn
            .execute_batch(CREATE_CHATS_TABLE)
            .map_err(|e| StoreError::Provisioning(format!("Failed to create chats table: {}", e)))?;

        self.conn
            .execute_batch(CREATE_MESSAGES_TABLE)
            .map_err(|e| StoreError::Provisioning(format!("Failed to create messages table: {}", e)))?;

        self.conn
            .execute_batch(CREATE_INDEXES)
            .map_err(|e| StoreError::Provisioning(format!("Failed to create indexes: {}", e)))?;

        log::info!("Database initialized ({} schema objects)", SCHEMA_OBJECTS.len());
        Ok(())
    }

    /// True when every table and index of the schema exists
    pub fn is_provisioned(&self) -> Result<bool> {
        for (kind, name) in SCHEMA_OBJECTS {
            let count: i64 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = ? AND name = ?",
                    params![kind, name],
                    |row| row.get(0),
                )
                .map_err(|e| StoreError::from_sqlite("Failed to inspect schema", e))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Get total chat count
    pub fn chat_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM chats", [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite("Failed to count chats", e))
    }

    /// Get total message count
    pub fn message_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite("Failed to count messages", e))
    }

    /// Get message count of one chat
    pub fn message_count_for_chat(&self, chat_id: i64) -> Result<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM messages WHERE chatId = ?",
                params![chat_id],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to count messages of chat {}", chat_id), e))
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats> {
        let chat_count = self.chat_count()?;
        let message_count = self.message_count()?;

        let total_unread: i64 = self
            .conn
            .query_row("SELECT COALESCE(SUM(unreadCount), 0) FROM chats", [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite("Failed to sum unread counts", e))?;

        let file_size: i64 = self
            .conn
            .query_row(
                "SELECT page_count * page_size FROM pragma_page_count(), pragma_page_size()",
                [],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::from_sqlite("Failed to get database size", e))?;

        Ok(DatabaseStats {
            chat_count,
            message_count,
            total_unread,
            file_size_bytes: file_size.max(0) as u64,
        })
    }
}

/// Helper function to convert a `chats` row to [`Chat`]
pub(crate) fn row_to_chat(row: &Row) -> rusqlite::Result<Chat> {
    Ok(Chat {
        id: row.get(0)?,
        title: row.get(1)?,
        last_message_at: row.get(2)?,
        unread_count: row.get(3)?,
    })
}

/// Helper function to convert a `messages` row to [`Message`]
pub(crate) fn row_to_message(row: &Row) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        chat_id: row.get(1)?,
        ts: row.get(2)?,
        sender: row.get(3)?,
        body: row.get(4)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub chat_count: i64,
    pub message_count: i64,
    pub total_unread: i64,
    pub file_size_bytes: u64,
}
