//! Save-operation interception for sqlx write paths
//!
//! This crate wraps the point where a write result comes back from the
//! database and, when the driver rejected the write over a constraint,
//! re-surfaces the failure as a typed [`SaveError`] with the original driver
//! error preserved as its source. Errors matching no classification rule
//! pass through untouched.
//!
//! The provider is resolved once, when the interceptor is constructed, and
//! the synchronous and asynchronous paths share one classification code
//! path.

pub mod database;
pub mod error;
pub mod interceptor;

pub use classifier::{Provider, Violation, ViolationKind};
pub use error::SaveError;
pub use interceptor::{SaveInterceptor, SaveResultExt};
