//! One-time population of an empty store with synthetic chats
//!
//! The whole run is a single immediate transaction: the emptiness probe and
//! every insert commit together or not at all, so an interrupted seed never
//! leaves a store that looks seeded.

pub mod content;

use crate::config::SeedConfig;
use crate::error::{Result, StoreError};
use crate::storage::Database;
use crate::storage::mutations::{INSERT_CHAT, INSERT_MESSAGE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::{TransactionBehavior, params};
use std::time::Instant;

/// Outcome of a seed run
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    /// Chats written, 0 when the store was already populated
    pub chats_written: u64,

    /// Messages written, 0 when the store was already populated
    pub messages_written: u64,

    /// Wall time of the run in seconds
    pub processing_time: f64,
}

impl SeedReport {
    pub fn skipped(&self) -> bool {
        self.chats_written == 0
    }
}

/// Synthetic data generator
pub struct Seeder {
    config: SeedConfig,
    now_ms: Option<i64>,
}

impl Seeder {
    pub fn new(config: SeedConfig) -> Self {
        Self { config, now_ms: None }
    }

    /// Pin "now" so generated timestamps are predictable
    pub fn with_now(mut self, now_ms: i64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// Seed `db` if it holds no chats; otherwise do nothing
    ///
    /// The configuration is only checked once the store is known to be
    /// empty, so a populated store is a no-op whatever the settings.
    pub fn seed_if_empty(&self, db: &mut Database) -> Result<SeedReport> {
        let start = Instant::now();
        let now = self.now_ms.unwrap_or_else(crate::utils::now_millis);
        let step = self.config.step_ms;
        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let tx = db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StoreError::from_sqlite("Failed to start seed transaction", e))?;

        let existing: i64 = tx
            .query_row("SELECT COUNT(*) FROM chats", [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite("Failed to probe chats", e))?;
        if existing > 0 {
            log::info!("Store already holds {} chats, skipping seed", existing);
            return Ok(SeedReport::default());
        }
        self.config.validate()?;

        let mut report = SeedReport::default();
        {
            let mut insert_chat = tx
                .prepare(INSERT_CHAT)
                .map_err(|e| StoreError::from_sqlite("Failed to prepare chat insert", e))?;
            let mut insert_message = tx
                .prepare(INSERT_MESSAGE)
                .map_err(|e| StoreError::from_sqlite("Failed to prepare message insert", e))?;
            let mut reconcile = tx
                .prepare("UPDATE chats SET lastMessageAt = ? WHERE id = ?")
                .map_err(|e| StoreError::from_sqlite("Failed to prepare chat update", e))?;

            let mut message_id: i64 = 1;

            for chat_id in 1..=i64::from(self.config.chat_count) {
                let title = content::company_name(&mut rng);
                let unread = rng.gen_range(0..self.config.max_unread);

                // Placeholder timestamp, reconciled after the messages land
                insert_chat
                    .execute(params![chat_id, title, 0i64, unread])
                    .map_err(|e| StoreError::from_sqlite(&format!("Failed to seed chat {}", chat_id), e))?;

                let count = i64::from(rng.gen_range(self.config.min_messages..self.config.max_messages));
                let first_ts = step
                    .checked_mul(count)
                    .and_then(|span| now.checked_sub(span))
                    .ok_or_else(|| {
                        StoreError::Config(format!(
                            "{} messages spaced {}ms before {} do not fit in an i64 timestamp",
                            count, step, now
                        ))
                    })?;
                let mut newest = 0i64;

                // first_ts + count * step == now, so no step below overflows
                for k in 0..count {
                    let ts = first_ts + k * step;
                    let sender = content::person_name(&mut rng);
                    let body = content::sentence(&mut rng);

                    insert_message
                        .execute(params![message_id, chat_id, ts, sender, body])
                        .map_err(|e| {
                            StoreError::from_sqlite(&format!("Failed to seed message {}", message_id), e)
                        })?;

                    newest = ts;
                    message_id += 1;
                }

                reconcile
                    .execute(params![newest, chat_id])
                    .map_err(|e| StoreError::from_sqlite(&format!("Failed to reconcile chat {}", chat_id), e))?;

                report.chats_written += 1;
                report.messages_written += count as u64;
            }
        }

        tx.commit()
            .map_err(|e| StoreError::from_sqlite("Failed to commit seed transaction", e))?;

        report.processing_time = start.elapsed().as_secs_f64();
        log::info!(
            "Seeded {} chats and {} messages in {:.2}s",
            report.chats_written,
            report.messages_written,
            report.processing_time
        );
        Ok(report)
    }
}

/// Seed `db` with `config` if it is empty; returns the number of messages written
pub fn seed_if_empty(db: &mut Database, config: &SeedConfig) -> Result<u64> {
    Ok(Seeder::new(config.clone()).seed_if_empty(db)?.messages_written)
}
