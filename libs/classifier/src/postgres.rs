//! PostgreSQL rule table
//!
//! PostgreSQL identifies constraint failures precisely through SQLSTATE
//! codes (class 23 for integrity constraints, class 22 for data exceptions),
//! so the code alone decides the kind and the message is only consulted for
//! the constraint or column name.

use crate::classify::RawError;
use crate::violation::{Violation, ViolationKind};
use regex::Regex;
use std::sync::OnceLock;

// SQLSTATE codes from the PostgreSQL errcodes appendix
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

pub(crate) fn classify(error: RawError<'_>) -> Option<Violation> {
    let kind = match error.code? {
        UNIQUE_VIOLATION => ViolationKind::UniqueConstraint,
        FOREIGN_KEY_VIOLATION => ViolationKind::ReferenceConstraint,
        NOT_NULL_VIOLATION => ViolationKind::NotNull,
        STRING_DATA_RIGHT_TRUNCATION => ViolationKind::MaxLength,
        NUMERIC_VALUE_OUT_OF_RANGE => ViolationKind::NumericOverflow,
        _ => return None,
    };

    Some(Violation::new(kind, extract_name(kind, error.message)))
}

/// Parse the constraint or column name out of the server message
///
/// The truncation and overflow messages name the offending type rather than
/// a column, so those kinds never carry a name.
fn extract_name(kind: ViolationKind, message: &str) -> Option<String> {
    match kind {
        ViolationKind::UniqueConstraint => unique_constraint_name(message),
        ViolationKind::ReferenceConstraint => foreign_key_constraint_name(message),
        ViolationKind::NotNull => column_name(message),
        ViolationKind::MaxLength | ViolationKind::NumericOverflow => None,
    }
}

/// Match `... violates unique constraint "products_name_key"`
fn unique_constraint_name(message: &str) -> Option<String> {
    static UNIQUE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = UNIQUE_REGEX.get_or_init(|| {
        Regex::new(r#"unique constraint "([^"]+)""#)
            .expect("Failed to compile unique constraint regex")
    });

    first_capture(regex, message)
}

/// Match `... violates foreign key constraint "product_sales_product_id_fkey"`
fn foreign_key_constraint_name(message: &str) -> Option<String> {
    static FOREIGN_KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = FOREIGN_KEY_REGEX.get_or_init(|| {
        Regex::new(r#"foreign key constraint "([^"]+)""#)
            .expect("Failed to compile foreign key constraint regex")
    });

    first_capture(regex, message)
}

/// Match `null value in column "name" ...`
fn column_name(message: &str) -> Option<String> {
    static COLUMN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COLUMN_REGEX.get_or_init(|| {
        Regex::new(r#"column "([^"]+)""#).expect("Failed to compile column name regex")
    });

    first_capture(regex, message)
}

fn first_capture(regex: &Regex, message: &str) -> Option<String> {
    regex
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str().to_string())
}
