//! Database schema definitions

/// SQL for creating the chats table
///
/// `id` is assigned by the caller; `lastMessageAt` and `unreadCount` are
/// denormalized and maintained only through the mutation API.
pub const CREATE_CHATS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS chats (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    lastMessageAt INTEGER NOT NULL,
    unreadCount INTEGER NOT NULL DEFAULT 0
);
"#;

/// SQL for creating the messages table
pub const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY,
    chatId INTEGER NOT NULL,
    ts INTEGER NOT NULL,
    sender TEXT NOT NULL,
    body TEXT NOT NULL,
    FOREIGN KEY (chatId) REFERENCES chats (id)
);
"#;

/// SQL for creating the list and search indexes
///
/// The body index only helps prefix patterns; `%query%` still scans.
pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_chats_lastMessageAt ON chats(lastMessageAt DESC);
CREATE INDEX IF NOT EXISTS idx_messages_chatId_ts ON messages(chatId, ts DESC);
CREATE INDEX IF NOT EXISTS idx_messages_body ON messages(body);
"#;

pub const CHAT_COLUMNS: &str = "id, title, lastMessageAt, unreadCount";

pub const MESSAGE_COLUMNS: &str = "id, chatId, ts, sender, body";

/// Every table and index the store provisions, for existence checks
pub const SCHEMA_OBJECTS: &[(&str, &str)] = &[
    ("table", "chats"),
    ("table", "messages"),
    ("index", "idx_chats_lastMessageAt"),
    ("index", "idx_messages_chatId_ts"),
    ("index", "idx_messages_body"),
];
