//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary counsellor records, keyed by `counsellor_id`.
    pub const COUNSELLORS: &str = "counsellors";

    /// Primary case records, keyed by `case_id`.
    pub const CASES: &str = "cases";

    /// Index: cases by assigned counsellor, keyed by
    /// `counsellor_id || 0x00 || case_id`.
    pub const CASES_BY_COUNSELLOR: &str = "cases_by_counsellor";

    /// Index: cases by status, keyed by `status || case_id`.
    pub const CASES_BY_STATUS: &str = "cases_by_status";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::COUNSELLORS,
        cf::CASES,
        cf::CASES_BY_COUNSELLOR,
        cf::CASES_BY_STATUS,
    ]
}
