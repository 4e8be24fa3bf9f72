//! Typed save failures raised in place of raw driver errors

use classifier::{Violation, ViolationKind};
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error surface of a guarded save operation
///
/// Five variants carry a classified constraint violation with the original
/// driver error retained as source; [`SaveError::Unclassified`] passes an
/// unrecognized error through without rewording it. A failed write stays a
/// failed write either way, only the shape of the report changes.
#[derive(Error, Debug)]
pub enum SaveError {
    /// A unique index or primary key rejected a duplicate value
    #[error("unique constraint violation{}", fmt_name(.constraint))]
    UniqueConstraint {
        /// Constraint name parsed from the driver message, when available
        constraint: Option<String>,
        #[source]
        source: SqlxError,
    },

    /// A required column received no value
    #[error("not-null constraint violation{}", fmt_name(.column))]
    NotNull {
        /// Column name parsed from the driver message, when available
        column: Option<String>,
        #[source]
        source: SqlxError,
    },

    /// A value exceeded the column's declared maximum length
    #[error("maximum length exceeded{}", fmt_name(.column))]
    MaxLength {
        /// Column name parsed from the driver message, when available
        column: Option<String>,
        #[source]
        source: SqlxError,
    },

    /// A numeric value exceeded the column's declared precision or range
    #[error("numeric overflow{}", fmt_name(.column))]
    NumericOverflow {
        /// Column name parsed from the driver message, when available
        column: Option<String>,
        #[source]
        source: SqlxError,
    },

    /// A foreign key referenced a row that does not exist
    #[error("reference constraint violation{}", fmt_name(.constraint))]
    ReferenceConstraint {
        /// Constraint name parsed from the driver message, when available
        constraint: Option<String>,
        #[source]
        source: SqlxError,
    },

    /// A driver error that matched no classification rule, passed through
    /// with its message, source chain, and downcastability intact
    #[error(transparent)]
    Unclassified(#[from] SqlxError),
}

impl SaveError {
    /// Wrap a classified violation around the raw driver error that produced it
    pub fn from_violation(violation: Violation, source: SqlxError) -> Self {
        let Violation { kind, constraint } = violation;
        match kind {
            ViolationKind::UniqueConstraint => Self::UniqueConstraint { constraint, source },
            ViolationKind::NotNull => Self::NotNull {
                column: constraint,
                source,
            },
            ViolationKind::MaxLength => Self::MaxLength {
                column: constraint,
                source,
            },
            ViolationKind::NumericOverflow => Self::NumericOverflow {
                column: constraint,
                source,
            },
            ViolationKind::ReferenceConstraint => Self::ReferenceConstraint { constraint, source },
        }
    }

    /// The classified violation kind, or `None` for a pass-through error
    pub fn kind(&self) -> Option<ViolationKind> {
        match self {
            Self::UniqueConstraint { .. } => Some(ViolationKind::UniqueConstraint),
            Self::NotNull { .. } => Some(ViolationKind::NotNull),
            Self::MaxLength { .. } => Some(ViolationKind::MaxLength),
            Self::NumericOverflow { .. } => Some(ViolationKind::NumericOverflow),
            Self::ReferenceConstraint { .. } => Some(ViolationKind::ReferenceConstraint),
            Self::Unclassified(_) => None,
        }
    }

    /// The constraint or column name parsed from the driver message
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueConstraint { constraint, .. }
            | Self::ReferenceConstraint { constraint, .. } => constraint.as_deref(),
            Self::NotNull { column, .. }
            | Self::MaxLength { column, .. }
            | Self::NumericOverflow { column, .. } => column.as_deref(),
            Self::Unclassified(_) => None,
        }
    }

    /// The underlying driver error, kept for diagnostics and never reinterpreted
    pub fn driver_error(&self) -> &SqlxError {
        match self {
            Self::UniqueConstraint { source, .. }
            | Self::NotNull { source, .. }
            | Self::MaxLength { source, .. }
            | Self::NumericOverflow { source, .. }
            | Self::ReferenceConstraint { source, .. }
            | Self::Unclassified(source) => source,
        }
    }
}

fn fmt_name(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" on {}", name),
        None => String::new(),
    }
}

/// Custom error type for database setup operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
