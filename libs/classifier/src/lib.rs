//! Provider-aware classification of low-level database errors
//!
//! This crate maps the vendor-specific error codes and messages raised by a
//! relational engine on a rejected write to a small, provider-agnostic
//! violation taxonomy. Classification is a pure function of the provider and
//! the raw error: no I/O, no shared state, and no failure mode beyond
//! declining to classify.

pub mod classify;
pub mod provider;
pub mod violation;

mod mysql;
mod postgres;
mod sqlite;
mod sqlserver;

pub use classify::{RawError, classify};
pub use provider::{Provider, ProviderError};
pub use violation::{Violation, ViolationKind};
