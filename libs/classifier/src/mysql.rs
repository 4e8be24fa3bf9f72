//! MySQL rule table
//!
//! MySQL's SQLSTATE values conflate the integrity violations under `23000`,
//! so classification keys on the server error number instead. The caller is
//! expected to pass the number (for example `1062`), not the SQLSTATE.

use crate::classify::RawError;
use crate::violation::{Violation, ViolationKind};
use regex::Regex;
use std::sync::OnceLock;

// Server error numbers from the MySQL error reference
const ER_DUP_ENTRY: u32 = 1062;
const ER_BAD_NULL_ERROR: u32 = 1048;
const ER_DATA_TOO_LONG: u32 = 1406;
const ER_WARN_DATA_OUT_OF_RANGE: u32 = 1264;
const ER_ROW_IS_REFERENCED_2: u32 = 1451;
const ER_NO_REFERENCED_ROW_2: u32 = 1452;

pub(crate) fn classify(error: RawError<'_>) -> Option<Violation> {
    let number: u32 = error.code?.parse().ok()?;

    let kind = match number {
        ER_DUP_ENTRY => ViolationKind::UniqueConstraint,
        ER_ROW_IS_REFERENCED_2 | ER_NO_REFERENCED_ROW_2 => ViolationKind::ReferenceConstraint,
        ER_BAD_NULL_ERROR => ViolationKind::NotNull,
        ER_DATA_TOO_LONG => ViolationKind::MaxLength,
        ER_WARN_DATA_OUT_OF_RANGE => ViolationKind::NumericOverflow,
        _ => return None,
    };

    Some(Violation::new(kind, extract_name(kind, error.message)))
}

fn extract_name(kind: ViolationKind, message: &str) -> Option<String> {
    match kind {
        ViolationKind::UniqueConstraint => key_name(message),
        ViolationKind::ReferenceConstraint => foreign_key_constraint_name(message),
        ViolationKind::NotNull
        | ViolationKind::MaxLength
        | ViolationKind::NumericOverflow => column_name(message),
    }
}

/// Match `Duplicate entry 'GD' for key 'products.name'`
fn key_name(message: &str) -> Option<String> {
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = KEY_REGEX.get_or_init(|| {
        Regex::new(r"for key '([^']+)'").expect("Failed to compile duplicate key regex")
    });

    first_capture(regex, message)
}

/// Match ``CONSTRAINT `fk_product` FOREIGN KEY`` inside the failure detail
fn foreign_key_constraint_name(message: &str) -> Option<String> {
    static CONSTRAINT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CONSTRAINT_REGEX.get_or_init(|| {
        Regex::new(r"CONSTRAINT `([^`]+)`").expect("Failed to compile constraint name regex")
    });

    first_capture(regex, message)
}

/// Match `Column 'name' cannot be null`, `Data too long for column 'name' at
/// row 1`, and `Out of range value for column 'price' at row 1`
fn column_name(message: &str) -> Option<String> {
    static COLUMN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COLUMN_REGEX.get_or_init(|| {
        Regex::new(r"[Cc]olumn '([^']+)'").expect("Failed to compile column name regex")
    });

    first_capture(regex, message)
}

fn first_capture(regex: &Regex, message: &str) -> Option<String> {
    regex
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
