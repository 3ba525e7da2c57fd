//! Crate error type.
//!
//! Per-record issues during scanning and mapping (unparseable dates,
//! missing slot definitions) are recovered locally with diagnostics and
//! never surface here. Only store-invariant violations become errors,
//! and they fail the whole operation before any state changes.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the version store and migration commit path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// A version with this effective date already exists.
    #[error("a schedule version effective from {0} already exists")]
    DuplicateEffectiveFrom(NaiveDate),

    /// A referenced version id is not in the store.
    #[error("unknown schedule version '{0}'")]
    UnknownVersion(String),

    /// A decision references a record that does not exist.
    #[error("unknown record '{0}'")]
    UnknownRecord(String),

    /// An orphan reached commit without a decision.
    #[error("orphan record '{0}' has no decision")]
    UndecidedOrphan(String),

    /// The migration session has no pending version to commit.
    #[error("migration session has no pending version")]
    MissingPendingVersion,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;
