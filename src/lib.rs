//! # messenger-store
//!
//! Local message store behind a two-pane chat viewer: a list of chats ordered
//! by recent activity and, per chat, a newest-first message log with
//! substring search. Backed by embedded SQLite.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use messenger_store::{Database, SeedConfig, Seeder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open (and provision) the store
//!     let mut db = Database::open("messenger.db")?;
//!
//!     // Fill an empty store with synthetic chats
//!     let report = Seeder::new(SeedConfig::default()).seed_if_empty(&mut db)?;
//!     println!("Seeded {} messages", report.messages_written);
//!
//!     // First page of the chat list, then the newest messages of the top chat
//!     let chats = db.list_chats(0, 50)?;
//!     let messages = db.list_messages(chats[0].id, 0, 10)?;
//!
//!     for message in db.search_in_chat(chats[0].id, "report")? {
//!         println!("{}: {}", message.sender, message.body);
//!     }
//!     # let _ = messages;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod seed;
pub mod storage;
pub mod utils;

// Re-export main API types
pub use config::{Config, DatabaseConfig, QueryConfig, SeedConfig};
pub use error::{Result, StoreError};
pub use seed::{SeedReport, Seeder, seed_if_empty};
pub use storage::{Chat, Database, DatabaseStats, DEFAULT_PAGE_SIZE, Message, Page, SEARCH_LIMIT};
