//! The data-access seam the matching subsystem reads through.
//!
//! Matching never touches a database handle directly; every component takes
//! a [`CaseDirectory`], so the store can be swapped for an in-memory fake in
//! tests. The two operations mirror what the hosted document store offers:
//! an equality-filtered counsellor listing and an equality + "one-of"
//! filtered case count.

use std::sync::Arc;

use async_trait::async_trait;
use casework_core::CounsellorId;
use casework_store::{CaseStatus, CounsellorProfile, Store};

use crate::error::Result;

/// Read-only access to the counsellor roster and case records.
///
/// Implementations must not cache between calls: every matching decision
/// recomputes from current store contents.
#[async_trait]
pub trait CaseDirectory: Send + Sync {
    /// The active matching roster: counsellor-role records with `is_active`
    /// set, in the store's listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read.
    async fn active_counsellors(&self) -> Result<Vec<CounsellorProfile>>;

    /// Count cases assigned to a counsellor with any of the given statuses.
    ///
    /// An empty `statuses` slice means "any status". A counsellor with no
    /// assigned cases counts zero; this is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the case store cannot be read.
    async fn count_cases(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<u32>;
}

/// A [`CaseDirectory`] backed by any [`Store`] implementation.
pub struct StoreDirectory<S: Store> {
    store: Arc<S>,
}

impl<S: Store> StoreDirectory<S> {
    /// Create a directory over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: Store + 'static> CaseDirectory for StoreDirectory<S> {
    async fn active_counsellors(&self) -> Result<Vec<CounsellorProfile>> {
        Ok(self.store.list_active_counsellors()?)
    }

    async fn count_cases(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<u32> {
        Ok(self.store.count_cases_by_counsellor(counsellor_id, statuses)?)
    }
}

/// A scriptable directory for testing without a store.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::{async_trait, CaseDirectory, CaseStatus, CounsellorId, CounsellorProfile, Result};
    use casework_store::StoreError;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::time::Duration;

    /// A directory serving a fixed roster and scripted case counts.
    #[derive(Default)]
    pub struct StaticDirectory {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        roster: Vec<CounsellorProfile>,
        open_counts: HashMap<String, u32>,
        closed_counts: HashMap<String, u32>,
        failing: bool,
        delay: Option<Duration>,
    }

    impl StaticDirectory {
        /// Create an empty directory.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a counsellor to the roster.
        pub fn push_counsellor(&self, profile: CounsellorProfile) {
            self.inner.lock().roster.push(profile);
        }

        /// Script the open-case count for a counsellor.
        pub fn set_open_cases(&self, counsellor_id: &CounsellorId, count: u32) {
            self.inner
                .lock()
                .open_counts
                .insert(counsellor_id.as_str().to_string(), count);
        }

        /// Script the closed-case count for a counsellor.
        pub fn set_closed_cases(&self, counsellor_id: &CounsellorId, count: u32) {
            self.inner
                .lock()
                .closed_counts
                .insert(counsellor_id.as_str().to_string(), count);
        }

        /// Make every subsequent read fail with a database error.
        pub fn set_failing(&self, failing: bool) {
            self.inner.lock().failing = failing;
        }

        /// Delay every case-count read, for timeout tests.
        pub fn set_delay(&self, delay: Duration) {
            self.inner.lock().delay = Some(delay);
        }
    }

    #[async_trait]
    impl CaseDirectory for StaticDirectory {
        async fn active_counsellors(&self) -> Result<Vec<CounsellorProfile>> {
            let inner = self.inner.lock();
            if inner.failing {
                return Err(StoreError::Database("directory unavailable".to_string()).into());
            }
            Ok(inner
                .roster
                .iter()
                .filter(|p| p.is_matchable())
                .cloned()
                .collect())
        }

        async fn count_cases(
            &self,
            counsellor_id: &CounsellorId,
            statuses: &[CaseStatus],
        ) -> Result<u32> {
            let (failing, delay, open, closed) = {
                let inner = self.inner.lock();
                (
                    inner.failing,
                    inner.delay,
                    inner
                        .open_counts
                        .get(counsellor_id.as_str())
                        .copied()
                        .unwrap_or(0),
                    inner
                        .closed_counts
                        .get(counsellor_id.as_str())
                        .copied()
                        .unwrap_or(0),
                )
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if failing {
                return Err(StoreError::Database("case store unavailable".to_string()).into());
            }

            if statuses.is_empty() {
                return Ok(open + closed);
            }
            let mut count = 0;
            if statuses.iter().any(|s| s.is_open()) {
                count += open;
            }
            if statuses.contains(&CaseStatus::Closed) {
                count += closed;
            }
            Ok(count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casework_store::{MemoryStore, Specializations, StaffRole};
    use chrono::Utc;

    fn counsellor(id: &str, active: bool, role: StaffRole) -> CounsellorProfile {
        CounsellorProfile {
            id: CounsellorId::parse(id).unwrap(),
            name: id.to_string(),
            role,
            is_active: active,
            specialization: Specializations::default(),
            languages: vec![],
            experience_level: None,
            max_cases: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn store_directory_serves_active_roster() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_counsellor(&counsellor("c1", true, StaffRole::Counsellor))
            .unwrap();
        store
            .put_counsellor(&counsellor("c2", false, StaffRole::Counsellor))
            .unwrap();
        store
            .put_counsellor(&counsellor("a1", true, StaffRole::Admin))
            .unwrap();

        let directory = StoreDirectory::new(store);
        let roster = directory.active_counsellors().await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id.as_str(), "c1");
    }

    #[tokio::test]
    async fn static_directory_failure_propagates() {
        let directory = mock::StaticDirectory::new();
        directory.set_failing(true);

        let err = directory.active_counsellors().await.unwrap_err();
        assert!(err.is_retriable());
    }
}
