//! Deterministic mapping from raw driver errors to the unified taxonomy

use crate::provider::Provider;
use crate::violation::Violation;
use crate::{mysql, postgres, sqlite, sqlserver};

/// Borrowed, read-only view of a driver-level error
///
/// Decouples classification from any concrete driver crate: the caller
/// extracts whatever identifying signal its driver exposes and hands it over
/// as plain strings.
#[derive(Debug, Clone, Copy)]
pub struct RawError<'a> {
    /// Provider-specific code: a SQLSTATE, a vendor error number, or a
    /// SQLite result code, rendered as a string
    pub code: Option<&'a str>,
    /// Free-text message emitted by the engine
    pub message: &'a str,
}

/// Classify a raw driver error against the given provider's rule table
///
/// Pure and total: the same input always yields the same output, nothing is
/// touched beyond the arguments, and an error matching no rule yields `None`
/// so the caller can propagate the original error unchanged.
///
/// When a message could satisfy more than one rule, the tables resolve
/// first-match-wins in a fixed priority order: unique constraint, reference
/// constraint, not-null, max length, numeric overflow.
///
/// ```
/// use classifier::{Provider, RawError, ViolationKind, classify};
///
/// let raw = RawError {
///     code: Some("23505"),
///     message: "duplicate key value violates unique constraint \"products_name_key\"",
/// };
///
/// let violation = classify(Provider::Postgres, raw).unwrap();
/// assert_eq!(violation.kind, ViolationKind::UniqueConstraint);
/// assert_eq!(violation.constraint.as_deref(), Some("products_name_key"));
/// ```
pub fn classify(provider: Provider, error: RawError<'_>) -> Option<Violation> {
    match provider {
        Provider::Postgres => postgres::classify(error),
        Provider::MySql => mysql::classify(error),
        Provider::SqlServer => sqlserver::classify(error),
        Provider::Sqlite => sqlite::classify(error),
    }
}
