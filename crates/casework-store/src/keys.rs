//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions to encode and decode keys for the various
//! indexes. All keys are designed to support efficient prefix scans.
//!
//! Identifiers are opaque UTF-8 strings of varying length, so composite keys
//! join them with a `0x00` separator. Directory-issued IDs never contain a
//! NUL byte.

use casework_core::{CaseId, CounsellorId};

/// Separator between the two IDs in a composite index key.
const SEP: u8 = 0x00;

/// Encode a counsellor key (just the ID bytes).
#[must_use]
pub fn counsellor_key(counsellor_id: &CounsellorId) -> Vec<u8> {
    counsellor_id.as_bytes().to_vec()
}

/// Encode a case key (just the ID bytes).
#[must_use]
pub fn case_key(case_id: &CaseId) -> Vec<u8> {
    case_id.as_bytes().to_vec()
}

/// Encode a counsellor-case index key: `counsellor_id || 0x00 || case_id`.
///
/// This allows efficient prefix scans for all cases assigned to a
/// counsellor.
#[must_use]
pub fn counsellor_case_key(counsellor_id: &CounsellorId, case_id: &CaseId) -> Vec<u8> {
    let mut key = Vec::with_capacity(counsellor_id.as_bytes().len() + 1 + case_id.as_bytes().len());
    key.extend_from_slice(counsellor_id.as_bytes());
    key.push(SEP);
    key.extend_from_slice(case_id.as_bytes());
    key
}

/// Encode a counsellor prefix for scanning all cases by counsellor.
#[must_use]
pub fn counsellor_prefix(counsellor_id: &CounsellorId) -> Vec<u8> {
    let mut key = Vec::with_capacity(counsellor_id.as_bytes().len() + 1);
    key.extend_from_slice(counsellor_id.as_bytes());
    key.push(SEP);
    key
}

/// Extract the case ID from a counsellor-case key.
///
/// # Panics
///
/// Panics if the key contains no separator or the trailing bytes are not
/// valid UTF-8; both would mean the index was written by something other
/// than this module.
#[must_use]
pub fn extract_case_id_from_counsellor_case_key(key: &[u8]) -> CaseId {
    let sep = key
        .iter()
        .position(|&b| b == SEP)
        .expect("counsellor-case key missing separator");
    let raw = std::str::from_utf8(&key[sep + 1..]).expect("case id is not valid UTF-8");
    CaseId::parse(raw).expect("case id is empty")
}

/// Encode a status-case index key: `status || case_id`.
///
/// This allows efficient prefix scans for all cases with a given status.
#[must_use]
pub fn status_case_key(status: u8, case_id: &CaseId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + case_id.as_bytes().len());
    key.push(status);
    key.extend_from_slice(case_id.as_bytes());
    key
}

/// Encode a status prefix for scanning all cases by status.
#[must_use]
pub fn status_prefix(status: u8) -> Vec<u8> {
    vec![status]
}

/// Extract the case ID from a status-case key.
///
/// # Panics
///
/// Panics if the key is shorter than two bytes or the trailing bytes are not
/// valid UTF-8.
#[must_use]
pub fn extract_case_id_from_status_case_key(key: &[u8]) -> CaseId {
    let raw = std::str::from_utf8(&key[1..]).expect("case id is not valid UTF-8");
    CaseId::parse(raw).expect("case id is empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counsellor_case_key_round_trip() {
        let counsellor_id = CounsellorId::parse("usr_7f3a91c2").unwrap();
        let case_id = CaseId::parse("case-123").unwrap();

        let key = counsellor_case_key(&counsellor_id, &case_id);
        let extracted = extract_case_id_from_counsellor_case_key(&key);
        assert_eq!(extracted, case_id);
    }

    #[test]
    fn status_case_key_round_trip() {
        let case_id = CaseId::parse("case-123").unwrap();

        let key = status_case_key(2, &case_id);
        assert_eq!(key[0], 2);

        let extracted = extract_case_id_from_status_case_key(&key);
        assert_eq!(extracted, case_id);
    }

    #[test]
    fn prefix_scan_simulation() {
        let counsellor = CounsellorId::parse("c1").unwrap();
        let other = CounsellorId::parse("c10").unwrap();
        let case_id = CaseId::parse("a").unwrap();

        let key = counsellor_case_key(&counsellor, &case_id);
        let other_key = counsellor_case_key(&other, &case_id);
        let prefix = counsellor_prefix(&counsellor);

        // The separator keeps "c1" from matching keys written for "c10"
        assert!(key.starts_with(&prefix));
        assert!(!other_key.starts_with(&prefix));
    }
}
