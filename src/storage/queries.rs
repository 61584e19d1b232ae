//! Paginated reads and substring search
//!
//! All listings break timestamp ties on `id ASC` so that offset pages are
//! reproducible. Search is plain `LIKE '%q%'` containment, which scans.

use crate::error::{Result, StoreError};
use crate::storage::database::{Database, row_to_chat, row_to_message};
use crate::storage::schema::{CHAT_COLUMNS, MESSAGE_COLUMNS};
use crate::storage::{Chat, Message, Page};
use rusqlite::{OptionalExtension, Params, Row, params};

impl Database {
    /// Chats by most recent activity, `limit` rows starting at `offset`
    pub fn list_chats(&self, offset: i64, limit: i64) -> Result<Vec<Chat>> {
        check_page(offset, limit)?;

        let sql = format!(
            "SELECT {} FROM chats ORDER BY lastMessageAt DESC, id ASC LIMIT ? OFFSET ?",
            CHAT_COLUMNS
        );
        let chats = self.fetch_all(&sql, params![limit, offset], row_to_chat, "list chats")?;

        log::debug!("list_chats offset={} limit={} -> {}", offset, limit, chats.len());
        Ok(chats)
    }

    /// Messages of one chat, newest first
    pub fn list_messages(&self, chat_id: i64, offset: i64, limit: i64) -> Result<Vec<Message>> {
        check_page(offset, limit)?;

        let sql = format!(
            "SELECT {} FROM messages WHERE chatId = ? ORDER BY ts DESC, id ASC LIMIT ? OFFSET ?",
            MESSAGE_COLUMNS
        );
        let messages = self.fetch_all(
            &sql,
            params![chat_id, limit, offset],
            row_to_message,
            "list messages",
        )?;

        log::debug!(
            "list_messages chat={} offset={} limit={} -> {}",
            chat_id,
            offset,
            limit,
            messages.len()
        );
        Ok(messages)
    }

    /// Up to the search limit of messages in one chat whose body contains `query`
    pub fn search_in_chat(&self, chat_id: i64, query: &str) -> Result<Vec<Message>> {
        warn_if_blank(query);

        let sql = format!(
            r"SELECT {} FROM messages
              WHERE chatId = ? AND body LIKE ? ESCAPE '\'
              ORDER BY ts DESC, id ASC LIMIT ?",
            MESSAGE_COLUMNS
        );
        let results = self.fetch_all(
            &sql,
            params![chat_id, like_pattern(query), self.query.search_limit],
            row_to_message,
            "search messages",
        )?;

        log::debug!("search_in_chat chat={} query={:?} -> {}", chat_id, query, results.len());
        Ok(results)
    }

    /// Same containment search across every chat
    pub fn search_all(&self, query: &str) -> Result<Vec<Message>> {
        warn_if_blank(query);

        let sql = format!(
            r"SELECT {} FROM messages
              WHERE body LIKE ? ESCAPE '\'
              ORDER BY ts DESC, id ASC LIMIT ?",
            MESSAGE_COLUMNS
        );
        let results = self.fetch_all(
            &sql,
            params![like_pattern(query), self.query.search_limit],
            row_to_message,
            "search messages",
        )?;

        log::debug!("search_all query={:?} -> {}", query, results.len());
        Ok(results)
    }

    /// Get chat by ID
    pub fn get_chat(&self, chat_id: i64) -> Result<Option<Chat>> {
        let sql = format!("SELECT {} FROM chats WHERE id = ?", CHAT_COLUMNS);
        self.conn
            .query_row(&sql, params![chat_id], row_to_chat)
            .optional()
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to query chat {}", chat_id), e))
    }

    /// [`Database::list_chats`] wrapped as a page; `limit` falls back to
    /// the configured page size
    pub fn chats_page(&self, offset: i64, limit: Option<i64>) -> Result<Page<Chat>> {
        let limit = limit.unwrap_or(self.query.default_page_size);
        Ok(Page::new(self.list_chats(offset, limit)?, offset, limit))
    }

    /// [`Database::list_messages`] wrapped as a page
    pub fn messages_page(&self, chat_id: i64, offset: i64, limit: Option<i64>) -> Result<Page<Message>> {
        let limit = limit.unwrap_or(self.query.default_page_size);
        Ok(Page::new(self.list_messages(chat_id, offset, limit)?, offset, limit))
    }

    fn fetch_all<T, P, F>(&self, sql: &str, params: P, map: F, what: &str) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to prepare {}", what), e))?;

        let rows = stmt
            .query_map(params, map)
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to {}", what), e))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| StoreError::from_sqlite(&format!("Failed to read {} row", what), e))?);
        }
        Ok(result)
    }
}

fn check_page(offset: i64, limit: i64) -> Result<()> {
    if offset < 0 {
        return Err(StoreError::InvalidArgument(format!(
            "offset must be non-negative, got {}",
            offset
        )));
    }
    if limit <= 0 {
        return Err(StoreError::InvalidArgument(format!(
            "limit must be positive, got {}",
            limit
        )));
    }
    Ok(())
}

fn warn_if_blank(query: &str) {
    if query.is_empty() {
        log::warn!("search called with an empty query; every message matches");
    }
}

/// Build a `LIKE` pattern matching `query` anywhere, with `%`, `_` and the
/// escape character taken literally
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
