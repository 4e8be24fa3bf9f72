//! SQL Server rule table
//!
//! SQL Server signals constraint failures through numeric error numbers.
//! Error 547 covers both foreign key and check conflicts; it is mapped to a
//! reference violation, which matches the INSERT/DELETE conflicts a save
//! pipeline actually produces.

use crate::classify::RawError;
use crate::violation::{Violation, ViolationKind};
use regex::Regex;
use std::sync::OnceLock;

// Engine error numbers from the SQL Server errors catalog
const UNIQUE_CONSTRAINT_VIOLATION: u32 = 2627;
const DUPLICATE_KEY_ROW: u32 = 2601;
const CONSTRAINT_CONFLICT: u32 = 547;
const CANNOT_INSERT_NULL: u32 = 515;
const STRING_DATA_TRUNCATION: u32 = 8152;
const STRING_DATA_TRUNCATION_VERBOSE: u32 = 2628;
const ARITHMETIC_OVERFLOW: u32 = 8115;

pub(crate) fn classify(error: RawError<'_>) -> Option<Violation> {
    let number: u32 = error.code?.parse().ok()?;

    let kind = match number {
        UNIQUE_CONSTRAINT_VIOLATION | DUPLICATE_KEY_ROW => ViolationKind::UniqueConstraint,
        CONSTRAINT_CONFLICT => ViolationKind::ReferenceConstraint,
        CANNOT_INSERT_NULL => ViolationKind::NotNull,
        STRING_DATA_TRUNCATION | STRING_DATA_TRUNCATION_VERBOSE => ViolationKind::MaxLength,
        ARITHMETIC_OVERFLOW => ViolationKind::NumericOverflow,
        _ => return None,
    };

    Some(Violation::new(kind, extract_name(kind, error.message)))
}

fn extract_name(kind: ViolationKind, message: &str) -> Option<String> {
    match kind {
        // 2627 names a constraint, 2601 names a unique index
        ViolationKind::UniqueConstraint => {
            single_quoted_constraint(message).or_else(|| unique_index_name(message))
        }
        ViolationKind::ReferenceConstraint => double_quoted_constraint(message),
        ViolationKind::NotNull | ViolationKind::MaxLength => column_name(message),
        // 8115 only names the target data type
        ViolationKind::NumericOverflow => None,
    }
}

/// Match `Violation of UNIQUE KEY constraint 'AK_Products_Name'.`
fn single_quoted_constraint(message: &str) -> Option<String> {
    static CONSTRAINT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CONSTRAINT_REGEX.get_or_init(|| {
        Regex::new(r"constraint '([^']+)'").expect("Failed to compile constraint regex")
    });

    first_capture(regex, message)
}

/// Match `... with unique index 'IX_Products_Name'`
fn unique_index_name(message: &str) -> Option<String> {
    static INDEX_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = INDEX_REGEX.get_or_init(|| {
        Regex::new(r"unique index '([^']+)'").expect("Failed to compile unique index regex")
    });

    first_capture(regex, message)
}

/// Match `... conflicted with the FOREIGN KEY constraint "FK_Sales_Products"`
fn double_quoted_constraint(message: &str) -> Option<String> {
    static CONSTRAINT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CONSTRAINT_REGEX.get_or_init(|| {
        Regex::new(r#"constraint "([^"]+)""#).expect("Failed to compile constraint regex")
    });

    first_capture(regex, message)
}

/// Match `... into column 'Name'` and `..., column 'Name'`
fn column_name(message: &str) -> Option<String> {
    static COLUMN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COLUMN_REGEX.get_or_init(|| {
        Regex::new(r"column '([^']+)'").expect("Failed to compile column name regex")
    });

    first_capture(regex, message)
}

fn first_capture(regex: &Regex, message: &str) -> Option<String> {
    regex
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
