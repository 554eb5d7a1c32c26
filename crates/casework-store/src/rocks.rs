//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use casework_core::{CaseId, CounsellorId};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::types::{CaseRecord, CaseStatus, CounsellorProfile};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Counsellor Operations
    // =========================================================================

    fn put_counsellor(&self, profile: &CounsellorProfile) -> Result<()> {
        let cf = self.cf(cf::COUNSELLORS)?;
        let key = keys::counsellor_key(&profile.id);
        let value = Self::serialize(profile)?;

        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_counsellor(&self, counsellor_id: &CounsellorId) -> Result<Option<CounsellorProfile>> {
        let cf = self.cf(cf::COUNSELLORS)?;
        let key = keys::counsellor_key(counsellor_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn delete_counsellor(&self, counsellor_id: &CounsellorId) -> Result<()> {
        let cf = self.cf(cf::COUNSELLORS)?;
        let key = keys::counsellor_key(counsellor_id);

        if self
            .db
            .get_cf(&cf, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_none()
        {
            return Err(StoreError::NotFound);
        }

        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_counsellors(&self) -> Result<Vec<CounsellorProfile>> {
        let cf = self.cf(cf::COUNSELLORS)?;

        let mut profiles = Vec::new();
        let iter = self.db.iterator_cf(&cf, IteratorMode::Start);

        for item in iter {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let profile: CounsellorProfile = Self::deserialize(&value)?;
            profiles.push(profile);
        }

        Ok(profiles)
    }

    // =========================================================================
    // Case Operations
    // =========================================================================

    fn put_case(&self, case: &CaseRecord) -> Result<()> {
        let cf_cases = self.cf(cf::CASES)?;
        let cf_by_counsellor = self.cf(cf::CASES_BY_COUNSELLOR)?;
        let cf_by_status = self.cf(cf::CASES_BY_STATUS)?;

        let case_key = keys::case_key(&case.id);
        let value = Self::serialize(case)?;

        // Check if the case exists to handle index updates
        let old = self
            .db
            .get_cf(&cf_cases, &case_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<CaseRecord>(&data))
            .transpose()?;

        let mut batch = WriteBatch::default();

        // Update main record
        batch.put_cf(&cf_cases, &case_key, &value);

        // Update status index if status changed
        if let Some(old_case) = &old {
            if old_case.status != case.status {
                let old_status_key = keys::status_case_key(old_case.status.as_u8(), &case.id);
                batch.delete_cf(&cf_by_status, &old_status_key);
            }
        }
        batch.put_cf(
            &cf_by_status,
            keys::status_case_key(case.status.as_u8(), &case.id),
            [],
        );

        // Update counsellor index if the assignment changed. Unassigned
        // cases have no entry in this index.
        let old_assignee = old.as_ref().and_then(|c| c.assigned_counsellor_id.as_ref());
        if old_assignee != case.assigned_counsellor_id.as_ref() {
            if let Some(previous) = old_assignee {
                batch.delete_cf(
                    &cf_by_counsellor,
                    keys::counsellor_case_key(previous, &case.id),
                );
            }
        }
        if let Some(assignee) = &case.assigned_counsellor_id {
            batch.put_cf(
                &cf_by_counsellor,
                keys::counsellor_case_key(assignee, &case.id),
                [],
            );
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_case(&self, case_id: &CaseId) -> Result<Option<CaseRecord>> {
        let cf = self.cf(cf::CASES)?;
        let key = keys::case_key(case_id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn delete_case(&self, case_id: &CaseId) -> Result<()> {
        let cf_cases = self.cf(cf::CASES)?;
        let cf_by_counsellor = self.cf(cf::CASES_BY_COUNSELLOR)?;
        let cf_by_status = self.cf(cf::CASES_BY_STATUS)?;

        // Get the case to find its index entries
        let case = self.get_case(case_id)?.ok_or(StoreError::NotFound)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_cases, keys::case_key(case_id));
        batch.delete_cf(
            &cf_by_status,
            keys::status_case_key(case.status.as_u8(), case_id),
        );
        if let Some(assignee) = &case.assigned_counsellor_id {
            batch.delete_cf(&cf_by_counsellor, keys::counsellor_case_key(assignee, case_id));
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_all_cases(&self) -> Result<Vec<CaseRecord>> {
        let cf = self.cf(cf::CASES)?;

        let mut cases = Vec::new();
        let iter = self.db.iterator_cf(&cf, IteratorMode::Start);

        for item in iter {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let case: CaseRecord = Self::deserialize(&value)?;
            cases.push(case);
        }

        Ok(cases)
    }

    fn list_cases_by_status(&self, status: CaseStatus) -> Result<Vec<CaseRecord>> {
        let cf_by_status = self.cf(cf::CASES_BY_STATUS)?;
        let prefix = keys::status_prefix(status.as_u8());

        let mut cases = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_status,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            // Stop if we're past the prefix
            if !key.starts_with(&prefix) {
                break;
            }

            let case_id = keys::extract_case_id_from_status_case_key(&key);
            if let Some(case) = self.get_case(&case_id)? {
                cases.push(case);
            }
        }

        Ok(cases)
    }

    fn list_cases_by_counsellor(
        &self,
        counsellor_id: &CounsellorId,
        statuses: &[CaseStatus],
    ) -> Result<Vec<CaseRecord>> {
        let cf_by_counsellor = self.cf(cf::CASES_BY_COUNSELLOR)?;
        let prefix = keys::counsellor_prefix(counsellor_id);

        let mut cases = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_counsellor,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let case_id = keys::extract_case_id_from_counsellor_case_key(&key);
            if let Some(case) = self.get_case(&case_id)? {
                if statuses.is_empty() || statuses.contains(&case.status) {
                    cases.push(case);
                }
            }
        }

        Ok(cases)
    }

    fn update_case_status(&self, case_id: &CaseId, status: CaseStatus) -> Result<()> {
        let mut case = self.get_case(case_id)?.ok_or(StoreError::NotFound)?;
        case.status = status;
        case.updated_at = chrono::Utc::now();
        self.put_case(&case)
    }

    fn assign_case(&self, case_id: &CaseId, counsellor_id: Option<&CounsellorId>) -> Result<()> {
        let mut case = self.get_case(case_id)?.ok_or(StoreError::NotFound)?;
        case.assigned_counsellor_id = counsellor_id.cloned();
        case.updated_at = chrono::Utc::now();
        self.put_case(&case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Specializations, StaffRole};
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn counsellor(id: &str) -> CounsellorProfile {
        CounsellorProfile {
            id: CounsellorId::parse(id).unwrap(),
            name: format!("Counsellor {id}"),
            role: StaffRole::Counsellor,
            is_active: true,
            specialization: Specializations::default(),
            languages: vec!["en".to_string()],
            experience_level: None,
            max_cases: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn case(id: &str, status: CaseStatus, assignee: Option<&str>) -> CaseRecord {
        CaseRecord {
            id: CaseId::parse(id).unwrap(),
            status,
            assigned_counsellor_id: assignee.map(|a| CounsellorId::parse(a).unwrap()),
            case_topic: None,
            specialization_needed: None,
            preferred_language: None,
            complexity: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn counsellor_crud() {
        let (store, _dir) = create_test_store();
        let profile = counsellor("c1");

        // Create
        store.put_counsellor(&profile).unwrap();

        // Read
        let retrieved = store.get_counsellor(&profile.id).unwrap().unwrap();
        assert_eq!(retrieved.name, profile.name);
        assert_eq!(retrieved.max_cases, 5);

        // Update
        let mut updated = profile.clone();
        updated.max_cases = 8;
        store.put_counsellor(&updated).unwrap();
        let retrieved = store.get_counsellor(&profile.id).unwrap().unwrap();
        assert_eq!(retrieved.max_cases, 8);

        // Delete
        store.delete_counsellor(&profile.id).unwrap();
        assert!(store.get_counsellor(&profile.id).unwrap().is_none());
    }

    #[test]
    fn delete_missing_counsellor_is_not_found() {
        let (store, _dir) = create_test_store();
        let id = CounsellorId::parse("ghost").unwrap();
        assert!(matches!(
            store.delete_counsellor(&id),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn active_roster_excludes_admins_and_inactive() {
        let (store, _dir) = create_test_store();

        store.put_counsellor(&counsellor("c1")).unwrap();

        let mut admin = counsellor("a1");
        admin.role = StaffRole::Admin;
        store.put_counsellor(&admin).unwrap();

        let mut inactive = counsellor("c2");
        inactive.is_active = false;
        store.put_counsellor(&inactive).unwrap();

        let roster = store.list_active_counsellors().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id.as_str(), "c1");

        // The full listing keeps everyone
        assert_eq!(store.list_counsellors().unwrap().len(), 3);
    }

    #[test]
    fn case_crud() {
        let (store, _dir) = create_test_store();
        let record = case("case-1", CaseStatus::New, Some("c1"));

        store.put_case(&record).unwrap();

        let retrieved = store.get_case(&record.id).unwrap().unwrap();
        assert_eq!(retrieved.status, CaseStatus::New);

        store
            .update_case_status(&record.id, CaseStatus::InProgress)
            .unwrap();
        let updated = store.get_case(&record.id).unwrap().unwrap();
        assert_eq!(updated.status, CaseStatus::InProgress);

        store.delete_case(&record.id).unwrap();
        assert!(store.get_case(&record.id).unwrap().is_none());
    }

    #[test]
    fn list_cases_by_counsellor_with_status_filter() {
        let (store, _dir) = create_test_store();
        let c1 = CounsellorId::parse("c1").unwrap();

        store.put_case(&case("k1", CaseStatus::New, Some("c1"))).unwrap();
        store
            .put_case(&case("k2", CaseStatus::InProgress, Some("c1")))
            .unwrap();
        store
            .put_case(&case("k3", CaseStatus::Closed, Some("c1")))
            .unwrap();
        store.put_case(&case("k4", CaseStatus::New, Some("c2"))).unwrap();
        store.put_case(&case("k5", CaseStatus::New, None)).unwrap();

        let open = store
            .list_cases_by_counsellor(&c1, &CaseStatus::open_statuses())
            .unwrap();
        assert_eq!(open.len(), 2);

        let closed = store
            .list_cases_by_counsellor(&c1, &[CaseStatus::Closed])
            .unwrap();
        assert_eq!(closed.len(), 1);

        // Empty filter means any status
        let all = store.list_cases_by_counsellor(&c1, &[]).unwrap();
        assert_eq!(all.len(), 3);

        assert_eq!(
            store
                .count_cases_by_counsellor(&c1, &CaseStatus::open_statuses())
                .unwrap(),
            2
        );
    }

    #[test]
    fn count_for_unknown_counsellor_is_zero() {
        let (store, _dir) = create_test_store();
        let id = CounsellorId::parse("c9").unwrap();

        assert_eq!(store.count_cases_by_counsellor(&id, &[]).unwrap(), 0);
    }

    #[test]
    fn status_index_updated_on_change() {
        let (store, _dir) = create_test_store();
        let record = case("case-1", CaseStatus::New, None);
        store.put_case(&record).unwrap();

        assert_eq!(store.list_cases_by_status(CaseStatus::New).unwrap().len(), 1);
        assert_eq!(
            store.list_cases_by_status(CaseStatus::Closed).unwrap().len(),
            0
        );

        store.update_case_status(&record.id, CaseStatus::Closed).unwrap();

        assert_eq!(store.list_cases_by_status(CaseStatus::New).unwrap().len(), 0);
        assert_eq!(
            store.list_cases_by_status(CaseStatus::Closed).unwrap().len(),
            1
        );
    }

    #[test]
    fn counsellor_index_updated_on_reassignment() {
        let (store, _dir) = create_test_store();
        let c1 = CounsellorId::parse("c1").unwrap();
        let c2 = CounsellorId::parse("c2").unwrap();

        let record = case("case-1", CaseStatus::New, Some("c1"));
        store.put_case(&record).unwrap();
        assert_eq!(store.list_cases_by_counsellor(&c1, &[]).unwrap().len(), 1);

        // Reassign to c2
        store.assign_case(&record.id, Some(&c2)).unwrap();
        assert_eq!(store.list_cases_by_counsellor(&c1, &[]).unwrap().len(), 0);
        assert_eq!(store.list_cases_by_counsellor(&c2, &[]).unwrap().len(), 1);

        // Unassign
        store.assign_case(&record.id, None).unwrap();
        assert_eq!(store.list_cases_by_counsellor(&c2, &[]).unwrap().len(), 0);
        assert!(store
            .get_case(&record.id)
            .unwrap()
            .unwrap()
            .assigned_counsellor_id
            .is_none());
    }

    #[test]
    fn legacy_string_specialization_deserializes() {
        // Records written by the previous system stored `specialization`
        // as a bare string rather than an array.
        let json = serde_json::json!({
            "id": "c1",
            "name": "Thandi",
            "role": "counsellor",
            "isActive": true,
            "specialization": "trauma, crisis",
            "maxCases": 4,
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        });

        let profile: CounsellorProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.specialization.tags(), ["trauma", "crisis"]);
    }
}
