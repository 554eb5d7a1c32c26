//! `RocksDB` storage layer for casework.
//!
//! This crate provides persistent storage for counsellor profiles and case
//! records using `RocksDB` with column families for efficient indexing. It
//! is the document-store seam the matching subsystem reads through: any
//! store offering equality and "one-of" filtered reads on counsellor and
//! status fields satisfies the [`Store`] trait.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `counsellors`: Primary counsellor records, keyed by `counsellor_id`
//! - `cases`: Primary case records, keyed by `case_id`
//! - `cases_by_counsellor`: Index for listing cases by assigned counsellor
//! - `cases_by_status`: Index for listing cases by status
//!
//! # Example
//!
//! ```no_run
//! use casework_store::{RocksStore, Store, CaseStatus};
//! use casework_core::CounsellorId;
//!
//! let store = RocksStore::open("/tmp/casework-db").unwrap();
//!
//! // Count the open cases assigned to a counsellor
//! let counsellor_id = CounsellorId::parse("usr_7f3a91c2").unwrap();
//! let open = store
//!     .count_cases_by_counsellor(&counsellor_id, &CaseStatus::open_statuses())
//!     .unwrap();
//! ```
//!
//! # Testing
//!
//! The `test-utils` feature exposes `MemoryStore`, an insertion-ordered
//! in-memory implementation of [`Store`] for tests that should not touch
//! disk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod rocks;
pub mod schema;
pub mod types;

pub use error::{Result, StoreError};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use types::{
    CaseRecord, CaseStatus, Complexity, CounsellorProfile, ExperienceLevel, Specializations,
    StaffRole,
};

use casework_core::{CaseId, CounsellorId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (`RocksDB` on disk, in-memory for testing). Reads of
/// absent records return `Ok(None)` or empty vectors; errors are reserved
/// for the store itself failing.
pub trait Store: Send + Sync {
    // =========================================================================
    // Counsellor Operations
    // =========================================================================

    /// Insert or update a counsellor record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_counsellor(&self, profile: &CounsellorProfile) -> Result<()>;

    /// Get a counsellor by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_counsellor(&self, counsellor_id: &CounsellorId) -> Result<Option<CounsellorProfile>>;

    /// Delete a counsellor by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the counsellor doesn't exist.
    fn delete_counsellor(&self, counsellor_id: &CounsellorId) -> Result<()>;

    /// List all counsellor records, in a stable per-store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_counsellors(&self) -> Result<Vec<CounsellorProfile>>;

    /// List the active matching roster: records with the counsellor role
    /// and `is_active` set, in the same order as [`Store::list_counsellors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_active_counsellors(&self) -> Result<Vec<CounsellorProfile>> {
        Ok(self
            .list_counsellors()?
            .into_iter()
            .filter(CounsellorProfile::is_matchable)
            .collect())
    }

    // =========================================================================
    // Case Operations
    // =========================================================================

    /// Insert or update a case record.
    ///
    /// This also maintains the counsellor and status indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_case(&self, case: &CaseRecord) -> Result<()>;

    /// Get a case by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_case(&self, case_id: &CaseId) -> Result<Option<CaseRecord>>;

    /// Delete a case by ID.
    ///
    /// This also removes the case from all indexes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the case doesn't exist.
    fn delete_case(&self, case_id: &CaseId) -> Result<()>;

    /// List all case records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_all_cases(&self) -> Result<Vec<CaseRecord>>;

    /// List all cases with a given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_cases_by_status(&self, status: CaseStatus) -> Result<Vec<CaseRecord>>;

    /// List cases assigned to a counsellor, filtered to the given statuses.
    ///
    /// An empty `statuses` slice means "any status".
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_cases_by_counsellor(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<Vec<CaseRecord>>;

    /// Count cases assigned to a counsellor, filtered to the given statuses.
    ///
    /// An empty `statuses` slice means "any status". A counsellor with no
    /// assigned cases counts zero; this is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_cases_by_counsellor(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<u32> {
        let cases = self.list_cases_by_counsellor(counsellor_id, statuses)?;
        Ok(u32::try_from(cases.len()).unwrap_or(u32::MAX))
    }

    /// Update a case's status.
    ///
    /// This is a convenience method that also updates the status index
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the case doesn't exist.
    fn update_case_status(&self, case_id: &CaseId, status: CaseStatus) -> Result<()>;

    /// Assign a case to a counsellor, or unassign it with `None`.
    ///
    /// Last writer wins: there is no conflict detection against a
    /// concurrent assignment of the same case.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the case doesn't exist.
    fn assign_case(&self, case_id: &CaseId, counsellor_id: Option<&CounsellorId>) -> Result<()>;
}
