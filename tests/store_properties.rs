//! Behavioral properties of the mutation and query APIs

use messenger_store::{Chat, Database, Message, SeedConfig, Seeder, StoreError};
use std::collections::HashSet;

fn seeded_store(chat_count: u32) -> Database {
    let mut db = Database::memory().unwrap();
    let config = SeedConfig {
        chat_count,
        rng_seed: Some(42),
        ..SeedConfig::default()
    };
    Seeder::new(config).seed_if_empty(&mut db).unwrap();
    db
}

fn chat(id: i64, title: &str, last_message_at: i64, unread_count: i64) -> Chat {
    Chat {
        id,
        title: title.to_string(),
        last_message_at,
        unread_count,
    }
}

#[test]
fn test_seed_twice_keeps_row_counts() {
    let mut db = seeded_store(10);
    let chats = db.chat_count().unwrap();
    let messages = db.message_count().unwrap();

    let report = Seeder::new(SeedConfig::default()).seed_if_empty(&mut db).unwrap();
    assert_eq!(report.messages_written, 0);
    assert_eq!(db.chat_count().unwrap(), chats);
    assert_eq!(db.message_count().unwrap(), messages);
}

#[test]
fn test_reinsert_chat_keeps_first_values() {
    let db = Database::memory().unwrap();

    db.insert_chat(&chat(1, "Umbrella Labs", 100, 1)).unwrap();
    db.insert_chat(&chat(1, "Cyberdyne Systems", 900, 8)).unwrap();

    assert_eq!(db.get_chat(1).unwrap(), Some(chat(1, "Umbrella Labs", 100, 1)));
}

#[test]
fn test_pagination_is_complete_and_ordered() {
    let db = seeded_store(3);

    for chat_id in 1..=3 {
        let expected = db.message_count_for_chat(chat_id).unwrap();
        let mut seen = Vec::new();
        let mut offset = 0;

        loop {
            let page = db.list_messages(chat_id, offset, 50).unwrap();
            if page.is_empty() {
                break;
            }
            offset += page.len() as i64;
            seen.extend(page);
        }

        assert_eq!(seen.len() as i64, expected);
        let unique: HashSet<i64> = seen.iter().map(|m| m.id).collect();
        assert_eq!(unique.len(), seen.len());
        for pair in seen.windows(2) {
            assert!(pair[0].ts >= pair[1].ts);
        }
    }
}

#[test]
fn test_seeded_store_is_referentially_consistent() {
    let db = seeded_store(20);

    let mut total = 0;
    for chat in db.list_chats(0, 100).unwrap() {
        let newest = db.list_messages(chat.id, 0, 1).unwrap();
        assert_eq!(newest.len(), 1);
        assert_eq!(newest[0].ts, chat.last_message_at);
        assert_eq!(newest[0].chat_id, chat.id);
        total += db.message_count_for_chat(chat.id).unwrap();
    }

    // No message belongs to a chat outside the list
    assert_eq!(total, db.message_count().unwrap());
}

#[test]
fn test_search_finds_substring() {
    let db = seeded_store(2);
    db.insert_message(&Message {
        id: 1_000_000,
        chat_id: 2,
        ts: i64::MAX / 2,
        sender: "Ada Lovelace".to_string(),
        body: "hello world".to_string(),
    })
    .unwrap();

    let hits = db.search_in_chat(2, "wor").unwrap();
    assert!(hits.iter().any(|m| m.id == 1_000_000));
    assert!(hits.iter().all(|m| m.chat_id == 2 && m.body.contains("wor")));

    assert!(db.search_in_chat(2, "xyz123").unwrap().is_empty());
    assert!(db.search_all("xyz123").unwrap().is_empty());
}

#[test]
fn test_search_results_newest_first_and_capped() {
    let db = seeded_store(5);

    let hits = db.search_all("e").unwrap();
    assert_eq!(hits.len(), 50);
    for pair in hits.windows(2) {
        assert!(pair[0].ts >= pair[1].ts);
    }
}

#[test]
fn test_mark_read_visible_in_list() {
    let db = seeded_store(5);
    let target = db.list_chats(0, 5).unwrap()[2].id;

    db.record_incoming_message(target, i64::MAX / 2).unwrap();
    db.mark_chat_read(target).unwrap();

    let listed = db.list_chats(0, 50).unwrap();
    let found = listed.iter().find(|c| c.id == target).unwrap();
    assert_eq!(found.unread_count, 0);
}

#[test]
fn test_incoming_message_bookkeeping() {
    let db = Database::memory().unwrap();
    db.insert_chat(&chat(1, "Wayne Enterprises", 1_000, 4)).unwrap();
    db.insert_chat(&chat(2, "Stark Industries", 2_000, 0)).unwrap();

    db.record_incoming_message(1, 5_000).unwrap();

    let first = db.list_chats(0, 1).unwrap();
    assert_eq!(first[0], chat(1, "Wayne Enterprises", 5_000, 5));
}

#[test]
fn test_missing_chat_mutations_are_silent() {
    let db = seeded_store(2);
    let before = db.stats().unwrap();

    assert_eq!(db.mark_chat_read(9_999).unwrap(), 0);
    assert_eq!(db.record_incoming_message(9_999, 1).unwrap(), 0);

    let after = db.stats().unwrap();
    assert_eq!(before.chat_count, after.chat_count);
    assert_eq!(before.total_unread, after.total_unread);
}

#[test]
fn test_orphan_message_surfaces_constraint_violation() {
    let db = Database::memory().unwrap();
    let result = db.insert_message(&Message {
        id: 1,
        chat_id: 77,
        ts: 1,
        sender: "Nobody".to_string(),
        body: "lost".to_string(),
    });

    assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
}

#[test]
fn test_empty_store_lists_nothing() {
    let db = Database::memory().unwrap();
    assert!(db.list_chats(0, 50).unwrap().is_empty());
    assert!(db.list_messages(1, 0, 50).unwrap().is_empty());
    assert!(db.search_all("anything").unwrap().is_empty());
}
