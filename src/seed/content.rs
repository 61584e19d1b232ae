//! Synthetic chat content
//!
//! Word lists for organization titles, person names and short sentences.
//! Nothing here is load-bearing beyond being non-empty.

use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Beatriz", "Carlos", "Chen", "Dana", "Dmitri", "Elena", "Emeka",
    "Farah", "Grace", "Hana", "Ibrahim", "Ines", "Jonas", "Kai", "Leila", "Lucas", "Maya",
    "Noor", "Oskar", "Priya", "Quinn", "Rafael", "Sofia", "Tariq", "Uma", "Viktor", "Yuki",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bergstrom", "Castillo", "Dubois", "Eriksen", "Fontaine", "Garcia", "Haddad",
    "Ivanova", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov",
    "Quigley", "Rossi", "Schmidt", "Tanaka", "Umarov", "Varga", "Weber", "Xu", "Yilmaz", "Zhou",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "Group", "LLC", "Inc", "and Sons", "Partners", "Labs", "Holdings", "Industries", "Collective",
    "Studio",
];

const WORDS: &[&str] = &[
    "quarterly", "report", "meeting", "deploy", "schedule", "review", "budget", "client",
    "launch", "draft", "invoice", "roadmap", "update", "sync", "feedback", "design", "office",
    "ticket", "release", "lunch", "travel", "contract", "migration", "hello", "world", "coffee",
    "tomorrow", "today", "deadline", "notes", "slides", "server", "backup", "agenda", "call",
];

/// A person display name such as "Grace Okafor"
pub fn person_name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// An organization-style chat title in one of three shapes
pub fn company_name<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, LAST_NAMES), pick(rng, LAST_NAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES)
        ),
    }
}

/// A capitalized sentence of 4 to 12 words ending in a period
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    let word_count = rng.gen_range(4..=12);
    let mut words: Vec<&str> = (0..word_count).map(|_| pick(rng, WORDS)).collect();
    words.dedup();

    let mut text = words.join(" ");
    if let Some(first) = text.get(0..1) {
        let upper = first.to_uppercase();
        text.replace_range(0..1, &upper);
    }
    text.push('.');
    text
}

fn pick<'a, R: Rng>(rng: &mut R, list: &[&'a str]) -> &'a str {
    list.choose(rng).copied().unwrap_or("Unknown")
}
