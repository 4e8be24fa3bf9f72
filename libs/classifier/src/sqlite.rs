//! SQLite rule table
//!
//! SQLite reuses one result code (`SQLITE_CONSTRAINT`, 19) for every
//! constraint kind, so the message text is the only discriminating signal.
//! Drivers may report either the primary code or an extended code such as
//! 2067 (`SQLITE_CONSTRAINT_UNIQUE`); extended codes carry the primary code
//! in their low byte.
//!
//! The substring rules are heuristic by nature. They cover the failure
//! messages SQLite actually emits for unique, not-null, and foreign key
//! constraints; anything else declines rather than guessing.

use crate::classify::RawError;
use crate::violation::{Violation, ViolationKind};
use regex::Regex;
use std::sync::OnceLock;

const SQLITE_TOOBIG: i64 = 18;
const SQLITE_CONSTRAINT: i64 = 19;

pub(crate) fn classify(error: RawError<'_>) -> Option<Violation> {
    let code: i64 = error.code?.parse().ok()?;

    match code & 0xff {
        SQLITE_CONSTRAINT => classify_constraint(error.message),
        SQLITE_TOOBIG => Some(Violation::new(ViolationKind::MaxLength, None)),
        _ => None,
    }
}

/// Substring checks run in the fixed priority order: unique, foreign key,
/// not-null. A message matching several patterns resolves to the first.
fn classify_constraint(message: &str) -> Option<Violation> {
    if message.contains("UNIQUE constraint failed") {
        Some(Violation::new(
            ViolationKind::UniqueConstraint,
            failed_target(message),
        ))
    } else if message.contains("FOREIGN KEY constraint failed") {
        // SQLite never names the violated foreign key
        Some(Violation::new(ViolationKind::ReferenceConstraint, None))
    } else if message.contains("NOT NULL constraint failed") {
        Some(Violation::new(
            ViolationKind::NotNull,
            failed_target(message),
        ))
    } else {
        None
    }
}

/// Match the `table.column` target in `UNIQUE constraint failed: products.name`
fn failed_target(message: &str) -> Option<String> {
    static TARGET_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TARGET_REGEX.get_or_init(|| {
        Regex::new(r"constraint failed: (\S+)").expect("Failed to compile failed target regex")
    });

    regex
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
