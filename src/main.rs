//! messenger-store CLI application
//!
//! Command-line interface for the messenger-store library.

use anyhow::Context;
use clap::{Parser, Subcommand};
use messenger_store::utils::{format_file_size, format_timestamp, now_millis, truncate_text};
use messenger_store::{Chat, Config, Database, Message, Seeder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "messenger-store")]
#[command(about = "Local chat and message store with paginated listing and substring search")]
#[command(version)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tables and indexes if missing
    Init,

    /// Fill an empty store with synthetic chats and messages
    Seed {
        /// Fixed RNG seed for reproducible content
        #[arg(long)]
        rng_seed: Option<u64>,
    },

    /// List chats by most recent activity
    Chats {
        #[arg(long, default_value = "0")]
        offset: i64,

        /// Page size (defaults to the configured page size)
        #[arg(long)]
        limit: Option<i64>,
    },

    /// List messages of a chat, newest first
    Messages {
        chat_id: i64,

        #[arg(long, default_value = "0")]
        offset: i64,

        #[arg(long)]
        limit: Option<i64>,
    },

    /// Find messages whose body contains a substring
    Search {
        query: String,

        /// Restrict the search to one chat
        #[arg(long)]
        chat: Option<i64>,
    },

    /// Reset the unread counter of a chat
    Read { chat_id: i64 },

    /// Bump a chat for a newly arrived message
    Incoming {
        chat_id: i64,

        /// Arrival time in epoch milliseconds (defaults to now)
        #[arg(long)]
        ts: Option<i64>,
    },

    /// Show row counts and file size
    Stats,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Provisioning failure is fatal
    let mut db = Database::with_config(&config)
        .with_context(|| format!("Failed to open store at {}", config.database.path.display()))?;

    match cli.command {
        Commands::Init => {
            println!("✅ Store ready at {}", config.database.path.display());
        }
        Commands::Seed { rng_seed } => {
            let mut seed_config = config.seed.clone();
            if rng_seed.is_some() {
                seed_config.rng_seed = rng_seed;
            }
            let report = Seeder::new(seed_config).seed_if_empty(&mut db)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.skipped() {
                println!("ℹ️  Store already seeded, nothing written");
            } else {
                println!("✅ Seeding complete!");
                println!("   💬 Chats: {}", report.chats_written);
                println!("   📨 Messages: {}", report.messages_written);
                println!("   ⏱️  Time: {:.2}s", report.processing_time);
            }
        }
        Commands::Chats { offset, limit } => {
            let page = db.chats_page(offset, limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_chats(&page.items);
                if page.has_more {
                    println!("… more from --offset {}", page.next_offset);
                }
            }
        }
        Commands::Messages {
            chat_id,
            offset,
            limit,
        } => {
            let page = db.messages_page(chat_id, offset, limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_messages(&page.items);
                if page.has_more {
                    println!("… more from --offset {}", page.next_offset);
                }
            }
        }
        Commands::Search { query, chat } => {
            let results = match chat {
                Some(chat_id) => db.search_in_chat(chat_id, &query)?,
                None => db.search_all(&query)?,
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("❌ No results found");
            } else {
                println!("📋 Found {} results:", results.len());
                print_messages(&results);
            }
        }
        Commands::Read { chat_id } => {
            let updated = db.mark_chat_read(chat_id)?;
            report_update(cli.json, "read", chat_id, updated);
        }
        Commands::Incoming { chat_id, ts } => {
            let updated = db.record_incoming_message(chat_id, ts.unwrap_or_else(now_millis))?;
            report_update(cli.json, "incoming", chat_id, updated);
        }
        Commands::Stats => {
            let stats = db.stats()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("📊 Store statistics");
                println!("   💬 Chats: {}", stats.chat_count);
                println!("   📨 Messages: {}", stats.message_count);
                println!("   🔔 Unread: {}", stats.total_unread);
                println!("   💾 Size: {}", format_file_size(stats.file_size_bytes));
            }
        }
    }

    Ok(())
}

/// Config file (or defaults) with the `--db` override applied
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }
    Ok(config)
}

fn print_chats(chats: &[Chat]) {
    for chat in chats {
        println!(
            "{:>5}  {:<36}  {}  {:>3} unread",
            chat.id,
            truncate_text(&chat.title, 36),
            format_timestamp(chat.last_message_at),
            chat.unread_count
        );
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        println!(
            "[{}] #{} {}: {}",
            format_timestamp(message.ts),
            message.chat_id,
            message.sender,
            message.body
        );
    }
}

fn report_update(json: bool, action: &str, chat_id: i64, updated: usize) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "action": action, "chatId": chat_id, "updated": updated })
        );
    } else if updated == 0 {
        println!("ℹ️  No chat {}", chat_id);
    } else {
        println!("✅ Chat {} updated ({})", chat_id, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["messenger-store", "search", "hello", "--chat", "3"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["messenger-store", "chats", "--limit", "10", "--db", "x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Commands::Chats { offset, limit } => {
                assert_eq!(offset, 0);
                assert_eq!(limit, Some(10));
            }
            _ => panic!("Expected chats command"),
        }
    }

    #[test]
    fn test_missing_config_file_names_path() {
        let cli = Cli::try_parse_from(["messenger-store", "stats", "--config", "/no/such/config.json"]).unwrap();

        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("/no/such/config.json"));
        assert!(matches!(
            err.downcast_ref::<messenger_store::StoreError>(),
            Some(messenger_store::StoreError::Io(_))
        ));
    }

    #[test]
    fn test_db_flag_overrides_config() {
        let cli = Cli::try_parse_from(["messenger-store", "init", "--db", "override.db"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.database.path, PathBuf::from("override.db"));
    }
}
