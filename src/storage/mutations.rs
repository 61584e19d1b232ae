//! Single-row writes: idempotent inserts and chat-side bookkeeping
//!
//! Every statement here auto-commits on its own. Unknown chat ids are
//! silent no-ops for the bookkeeping calls; the affected row count is
//! returned for callers that care, but it is not an existence check.

use crate::error::{Result, StoreError};
use crate::storage::database::Database;
use crate::storage::{Chat, Message};
use rusqlite::params;

pub(crate) const INSERT_CHAT: &str = r#"
INSERT OR IGNORE INTO chats (id, title, lastMessageAt, unreadCount)
VALUES (?, ?, ?, ?)
"#;

pub(crate) const INSERT_MESSAGE: &str = r#"
INSERT OR IGNORE INTO messages (id, chatId, ts, sender, body)
VALUES (?, ?, ?, ?, ?)
"#;

impl Database {
    /// Insert a chat unless one with the same id exists.
    ///
    /// Returns true when a row was written. Re-inserting an id keeps the
    /// first version's fields.
    pub fn insert_chat(&self, chat: &Chat) -> Result<bool> {
        let written = self
            .conn
            .execute(
                INSERT_CHAT,
                params![chat.id, chat.title, chat.last_message_at, chat.unread_count],
            )
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to insert chat {}", chat.id), e))?;

        log::debug!("insert_chat id={} written={}", chat.id, written);
        Ok(written > 0)
    }

    /// Insert a message unless one with the same id exists.
    ///
    /// The owning chat is not touched; use [`Database::record_incoming_message`]
    /// for the chat-side bookkeeping. A message whose chat does not exist
    /// fails with [`StoreError::ConstraintViolation`].
    pub fn insert_message(&self, message: &Message) -> Result<bool> {
        let written = self
            .conn
            .execute(
                INSERT_MESSAGE,
                params![
                    message.id,
                    message.chat_id,
                    message.ts,
                    message.sender,
                    message.body
                ],
            )
            .map_err(|e| {
                StoreError::from_sqlite(&format!("Failed to insert message {}", message.id), e)
            })?;

        log::debug!(
            "insert_message id={} chat={} written={}",
            message.id,
            message.chat_id,
            written
        );
        Ok(written > 0)
    }

    /// Reset the unread counter of a chat to zero
    pub fn mark_chat_read(&self, chat_id: i64) -> Result<usize> {
        let updated = self
            .conn
            .execute("UPDATE chats SET unreadCount = 0 WHERE id = ?", params![chat_id])
            .map_err(|e| StoreError::from_sqlite(&format!("Failed to mark chat {} read", chat_id), e))?;

        if updated == 0 {
            log::debug!("mark_chat_read: no chat {}", chat_id);
        }
        Ok(updated)
    }

    /// Bump a chat for a newly arrived message: move `lastMessageAt` to
    /// `timestamp` and add one unread.
    pub fn record_incoming_message(&self, chat_id: i64, timestamp: i64) -> Result<usize> {
        let updated = self
            .conn
            .execute(
                "UPDATE chats SET lastMessageAt = ?, unreadCount = unreadCount + 1 WHERE id = ?",
                params![timestamp, chat_id],
            )
            .map_err(|e| {
                StoreError::from_sqlite(&format!("Failed to record message for chat {}", chat_id), e)
            })?;

        if updated == 0 {
            log::debug!("record_incoming_message: no chat {}", chat_id);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(id: i64, title: &str, last_message_at: i64, unread_count: i64) -> Chat {
        Chat {
            id,
            title: title.to_string(),
            last_message_at,
            unread_count,
        }
    }

    fn message(id: i64, chat_id: i64, ts: i64, body: &str) -> Message {
        Message {
            id,
            chat_id,
            ts,
            sender: "Grace Hopper".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_insert_chat_keeps_first_version() {
        let db = Database::memory().unwrap();

        assert!(db.insert_chat(&chat(1, "Initech", 100, 2)).unwrap());
        assert!(!db.insert_chat(&chat(1, "Globex", 999, 9)).unwrap());

        let stored = db.get_chat(1).unwrap().unwrap();
        assert_eq!(stored, chat(1, "Initech", 100, 2));
        assert_eq!(db.chat_count().unwrap(), 1);
    }

    #[test]
    fn test_insert_message_is_idempotent() {
        let db = Database::memory().unwrap();
        db.insert_chat(&chat(1, "Initech", 100, 0)).unwrap();

        assert!(db.insert_message(&message(10, 1, 100, "first")).unwrap());
        assert!(!db.insert_message(&message(10, 1, 200, "second")).unwrap());

        let messages = db.list_messages(1, 0, 10).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].body, "first");
    }

    #[test]
    fn test_insert_message_does_not_touch_chat() {
        let db = Database::memory().unwrap();
        db.insert_chat(&chat(1, "Initech", 100, 4)).unwrap();
        db.insert_message(&message(10, 1, 5_000, "later")).unwrap();

        let stored = db.get_chat(1).unwrap().unwrap();
        assert_eq!(stored.last_message_at, 100);
        assert_eq!(stored.unread_count, 4);
    }

    #[test]
    fn test_orphan_message_is_constraint_violation() {
        let db = Database::memory().unwrap();

        match db.insert_message(&message(10, 42, 100, "orphan")) {
            Err(StoreError::ConstraintViolation(_)) => (),
            other => panic!("Expected ConstraintViolation, got {:?}", other),
        }
        assert_eq!(db.message_count().unwrap(), 0);
    }

    #[test]
    fn test_mark_chat_read() {
        let db = Database::memory().unwrap();
        db.insert_chat(&chat(1, "Initech", 100, 7)).unwrap();

        assert_eq!(db.mark_chat_read(1).unwrap(), 1);
        assert_eq!(db.get_chat(1).unwrap().unwrap().unread_count, 0);
    }

    #[test]
    fn test_record_incoming_message() {
        let db = Database::memory().unwrap();
        db.insert_chat(&chat(1, "Initech", 100, 3)).unwrap();

        assert_eq!(db.record_incoming_message(1, 250).unwrap(), 1);

        let stored = db.get_chat(1).unwrap().unwrap();
        assert_eq!(stored.last_message_at, 250);
        assert_eq!(stored.unread_count, 4);
    }

    #[test]
    fn test_unknown_chat_is_noop() {
        let db = Database::memory().unwrap();

        assert_eq!(db.mark_chat_read(404).unwrap(), 0);
        assert_eq!(db.record_incoming_message(404, 1).unwrap(), 0);
        assert_eq!(db.chat_count().unwrap(), 0);
    }
}
