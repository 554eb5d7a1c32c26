//! Core identifier types for casework.
//!
//! This module provides strongly-typed identifiers for counsellors and cases.
//! Both are opaque strings: counsellor IDs are assigned by the external user
//! directory and never interpreted here, case IDs are minted on intake.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The identifier string was empty or all whitespace.
    #[error("identifier must not be empty")]
    Empty,
}

/// An opaque counsellor identifier, assigned by the user directory.
///
/// The directory guarantees stability and uniqueness; this type only
/// guarantees non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounsellorId(String);

impl CounsellorId {
    /// Parse a `CounsellorId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] if the string is empty or all whitespace.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the identifier as UTF-8 bytes, for use in store keys.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CounsellorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CounsellorId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CounsellorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque case identifier.
///
/// Fresh IDs are minted with [`CaseId::generate`] when a case is created;
/// existing IDs round-trip through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Generate a new unique `CaseId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse a `CaseId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Empty`] if the string is empty or all whitespace.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(s))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the identifier as UTF-8 bytes, for use in store keys.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CaseId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counsellor_id_parse_rejects_empty() {
        assert_eq!(CounsellorId::parse(""), Err(IdError::Empty));
        assert_eq!(CounsellorId::parse("   "), Err(IdError::Empty));
    }

    #[test]
    fn counsellor_id_parse_accepts_opaque_strings() {
        let id = CounsellorId::parse("usr_7f3a91c2").unwrap();
        assert_eq!(id.as_str(), "usr_7f3a91c2");
        assert_eq!(id.to_string(), "usr_7f3a91c2");
    }

    #[test]
    fn counsellor_id_from_str() {
        let id: CounsellorId = "c1".parse().unwrap();
        assert_eq!(id.as_str(), "c1");
    }

    #[test]
    fn case_id_generate_is_unique() {
        let a = CaseId::generate();
        let b = CaseId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = CounsellorId::parse("c1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"c1\"");

        let back: CounsellorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn case_id_serde_round_trip() {
        let id = CaseId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: CaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
