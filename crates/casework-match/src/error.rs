//! Error types for the matching subsystem.
//!
//! An empty candidate pool is not an error: it is the explicit
//! "no counsellor available" outcome, surfaced as `None` or an empty vector
//! so callers fall back to manual assignment. Errors here mean the
//! underlying store could not be read.

use casework_store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// A result type using `MatchError`.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur during matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A store read failed. Propagated unmodified: substituting a zeroed
    /// workload here would hide a real outage from the caller.
    #[error("data access error: {0}")]
    Store(#[from] StoreError),

    /// The workload fan-out did not complete within the configured limit.
    #[error("workload queries timed out after {0:?}")]
    Timeout(Duration),
}

impl MatchError {
    /// Returns true if this error might be resolved by retrying.
    ///
    /// The matching subsystem itself never retries; retry policy belongs to
    /// the caller.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Timeout(_))
    }
}
