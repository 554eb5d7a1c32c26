//! In-memory storage implementation for tests.
//!
//! `MemoryStore` keeps records in insertion order, which makes ordering
//! assertions in matching tests deterministic without depending on key
//! encoding.

use parking_lot::Mutex;

use casework_core::{CaseId, CounsellorId};

use crate::error::{Result, StoreError};
use crate::types::{CaseRecord, CaseStatus, CounsellorProfile};
use crate::Store;

/// An in-memory store, substitutable anywhere a [`Store`] is expected.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    counsellors: Vec<CounsellorProfile>,
    cases: Vec<CaseRecord>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counsellor records currently held.
    #[must_use]
    pub fn counsellor_count(&self) -> usize {
        self.inner.lock().counsellors.len()
    }

    /// Number of case records currently held.
    #[must_use]
    pub fn case_count(&self) -> usize {
        self.inner.lock().cases.len()
    }
}

impl Store for MemoryStore {
    fn put_counsellor(&self, profile: &CounsellorProfile) -> Result<()> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.counsellors.iter_mut().find(|c| c.id == profile.id) {
            *existing = profile.clone();
        } else {
            inner.counsellors.push(profile.clone());
        }
        Ok(())
    }

    fn get_counsellor(&self, counsellor_id: &CounsellorId) -> Result<Option<CounsellorProfile>> {
        Ok(self
            .inner
            .lock()
            .counsellors
            .iter()
            .find(|c| c.id == *counsellor_id)
            .cloned())
    }

    fn delete_counsellor(&self, counsellor_id: &CounsellorId) -> Result<()> {
        let mut inner = self.inner.lock();
        let before = inner.counsellors.len();
        inner.counsellors.retain(|c| c.id != *counsellor_id);
        if inner.counsellors.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn list_counsellors(&self) -> Result<Vec<CounsellorProfile>> {
        Ok(self.inner.lock().counsellors.clone())
    }

    fn put_case(&self, case: &CaseRecord) -> Result<()> {
        let mut inner = self.inner.lock();
        if let Some(existing) = inner.cases.iter_mut().find(|c| c.id == case.id) {
            *existing = case.clone();
        } else {
            inner.cases.push(case.clone());
        }
        Ok(())
    }

    fn get_case(&self, case_id: &CaseId) -> Result<Option<CaseRecord>> {
        Ok(self
            .inner
            .lock()
            .cases
            .iter()
            .find(|c| c.id == *case_id)
            .cloned())
    }

    fn delete_case(&self, case_id: &CaseId) -> Result<()> {
        let mut inner = self.inner.lock();
        let before = inner.cases.len();
        inner.cases.retain(|c| c.id != *case_id);
        if inner.cases.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn list_all_cases(&self) -> Result<Vec<CaseRecord>> {
        Ok(self.inner.lock().cases.clone())
    }

    fn list_cases_by_status(&self, status: CaseStatus) -> Result<Vec<CaseRecord>> {
        Ok(self
            .inner
            .lock()
            .cases
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    fn list_cases_by_counsellor(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<Vec<CaseRecord>> {
        Ok(self
            .inner
            .lock()
            .cases
            .iter()
            .filter(|c| c.assigned_counsellor_id.as_ref() == Some(counsellor_id))
            .filter(|c| statuses.is_empty() || statuses.contains(&c.status))
            .cloned()
            .collect())
    }

    fn update_case_status(&self, case_id: &CaseId, status: CaseStatus) -> Result<()> {
        let mut inner = self.inner.lock();
        let case = inner
            .cases
            .iter_mut()
            .find(|c| c.id == *case_id)
            .ok_or(StoreError::NotFound)?;
        case.status = status;
        case.updated_at = chrono::Utc::now();
        Ok(())
    }

    fn assign_case(&self, case_id: &CaseId, counsellor_id: Option<&CounsellorId>) -> Result<()> {
        let mut inner = self.inner.lock();
        let case = inner
            .cases
            .iter_mut()
            .find(|c| c.id == *case_id)
            .ok_or(StoreError::NotFound)?;
        case.assigned_counsellor_id = counsellor_id.cloned();
        case.updated_at = chrono::Utc::now();
        Ok(())
    }
}
