//! Storage functionality for messenger-store
//!
//! This module provides the chat/message store on embedded SQLite: schema
//! provisioning, idempotent inserts, read-state bookkeeping, offset
//! pagination and substring search.

pub mod database;
pub mod mutations;
pub mod queries;
pub mod schema;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use database::{Database, DatabaseStats};

/// Page size used when the caller does not pass one
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum number of messages returned by a search
pub const SEARCH_LIMIT: i64 = 50;

/// A conversation, the unit of the chat list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Caller-assigned identity
    pub id: i64,

    /// Display label, never empty
    pub title: String,

    /// Epoch milliseconds of the newest message; sole chat-list sort key
    pub last_message_at: i64,

    /// Messages not yet seen by the viewer
    pub unread_count: i64,
}

/// One timestamped line of text inside a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Caller-assigned identity, unique across all chats
    pub id: i64,

    /// Owning chat
    pub chat_id: i64,

    /// Epoch milliseconds, the per-chat ordering key
    pub ts: i64,

    pub sender: String,

    pub body: String,
}

/// One page of an offset-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Offset this page was read from
    pub offset: i64,

    /// Offset to request for the following page
    pub next_offset: i64,

    /// False once a page comes back short
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, offset: i64, limit: i64) -> Self {
        let len = items.len() as i64;
        Self {
            items,
            offset,
            next_offset: offset + len,
            has_more: len >= limit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_serializes_camel_case() {
        let chat = Chat {
            id: 7,
            title: "Acme Corp".to_string(),
            last_message_at: 1_700_000_000_000,
            unread_count: 3,
        };

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["lastMessageAt"], 1_700_000_000_000i64);
        assert_eq!(json["unreadCount"], 3);
    }

    #[test]
    fn test_message_deserializes_bridge_shape() {
        let message: Message = serde_json::from_str(
            r#"{"id":1,"chatId":2,"ts":3,"sender":"Ada","body":"hello world"}"#,
        )
        .unwrap();
        assert_eq!(message.chat_id, 2);
        assert_eq!(message.body, "hello world");
    }

    #[test]
    fn test_page_advances_offset() {
        let full = Page::new(vec![1, 2, 3], 6, 3);
        assert_eq!(full.next_offset, 9);
        assert!(full.has_more);

        let short = Page::new(vec![1], 9, 3);
        assert_eq!(short.next_offset, 10);
        assert!(!short.has_more);
    }
}
