//! Unified violation taxonomy shared by every provider rule table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified classification of a rejected write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A unique index or primary key rejected a duplicate value
    UniqueConstraint,
    /// A required column received no value
    NotNull,
    /// A value exceeded the column's declared maximum length
    MaxLength,
    /// A numeric value exceeded the column's declared precision or range
    NumericOverflow,
    /// A foreign key referenced a row that does not exist
    ReferenceConstraint,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UniqueConstraint => "unique constraint violation",
            Self::NotNull => "not-null constraint violation",
            Self::MaxLength => "maximum length exceeded",
            Self::NumericOverflow => "numeric overflow",
            Self::ReferenceConstraint => "reference constraint violation",
        };
        write!(f, "{}", label)
    }
}

/// A classified driver error
///
/// Carries the violation kind plus the constraint or column name parsed out
/// of the vendor message. The name is best-effort: when the message does not
/// carry one in a recognizable shape, classification still succeeds and the
/// name is simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The unified violation kind
    pub kind: ViolationKind,
    /// Constraint or column name from the vendor message, when available
    pub constraint: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(kind: ViolationKind, constraint: Option<String>) -> Self {
        Self { kind, constraint }
    }
}
