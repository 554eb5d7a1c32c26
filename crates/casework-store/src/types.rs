//! Domain types stored in the database.
//!
//! These types represent the persisted state of counsellors and cases.
//! Field names serialize in the store's native camelCase so records written
//! by earlier deployments deserialize unchanged.

use casework_core::{CaseId, CounsellorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a staff member in the user directory.
///
/// Only [`StaffRole::Counsellor`] entries participate in case matching;
/// admins and super-admins manage the roster but never receive assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Handles assigned cases.
    Counsellor,
    /// Manages counsellors and cases.
    Admin,
    /// Full administrative access.
    SuperAdmin,
}

/// Lifecycle status of a case.
///
/// Transitions (`new → inProgress → closed`) are driven by counsellor and
/// admin actions; the store records whatever status it is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum CaseStatus {
    /// Newly created, not yet worked.
    New = 1,
    /// Actively being worked by the assigned counsellor.
    InProgress = 2,
    /// Resolved and closed.
    Closed = 3,
}

impl CaseStatus {
    /// Whether this status counts against a counsellor's workload.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::New | Self::InProgress)
    }

    /// Convert the status to its numeric representation.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert a numeric value to a `CaseStatus`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::New),
            2 => Some(Self::InProgress),
            3 => Some(Self::Closed),
            _ => None,
        }
    }

    /// The statuses that count as open. Useful for workload queries.
    #[must_use]
    pub const fn open_statuses() -> [Self; 2] {
        [Self::New, Self::InProgress]
    }
}

/// Experience tier of a counsellor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Early-career counsellor.
    Junior,
    /// Several years of casework.
    Intermediate,
    /// Handles the most demanding cases.
    Senior,
}

/// Complexity tier of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    /// Routine support.
    Low,
    /// Needs sustained attention.
    Medium,
    /// Demands an experienced counsellor.
    High,
}

/// A counsellor's specialization tags, as a canonical ordered sequence.
///
/// Historical records store this field as either a single string (possibly
/// comma-joined) or an array of strings. Deserialization normalizes both
/// shapes here, at the data-access boundary, so matching logic only ever
/// sees a sequence of trimmed tags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SpecializationField")]
pub struct Specializations(Vec<String>);

/// The raw shapes the `specialization` field takes in stored records.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpecializationField {
    Many(Vec<String>),
    One(String),
}

impl From<SpecializationField> for Specializations {
    fn from(raw: SpecializationField) -> Self {
        let tags = match raw {
            SpecializationField::Many(tags) => tags,
            SpecializationField::One(s) => s.split(',').map(str::to_owned).collect(),
        };
        Self::from_tags(tags)
    }
}

impl Specializations {
    /// Build from an iterator of tags, trimming whitespace and dropping
    /// empty entries. Order is preserved; duplicates are not meaningful and
    /// are kept as-is.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_owned())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// The canonical tag sequence.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// Whether the counsellor has no declared specialization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is an in-house / general counsellor: no specialization,
    /// an explicit `"general"` tag, or any tag whose lower-cased form
    /// includes the substring `"general"`.
    #[must_use]
    pub fn is_general(&self) -> bool {
        self.0.is_empty()
            || self.0.iter().any(|t| t == "general")
            || self.0.iter().any(|t| t.to_lowercase().contains("general"))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Specializations {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tags(iter)
    }
}

/// A counsellor record stored in the database, synced from the user
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounsellorProfile {
    /// Unique identifier, assigned by the user directory.
    pub id: CounsellorId,
    /// Display name.
    pub name: String,
    /// Directory role.
    pub role: StaffRole,
    /// Inactive counsellors are excluded from matching entirely.
    pub is_active: bool,
    /// Specialization tags. Empty means "general".
    #[serde(default)]
    pub specialization: Specializations,
    /// Language codes. Empty means no preference signal.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Experience tier. Absent means no bonus during scoring.
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    /// Case-load ceiling, at least 1.
    pub max_cases: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CounsellorProfile {
    /// Whether this profile may participate in matching at all:
    /// active and holding the counsellor role.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        self.is_active && self.role == StaffRole::Counsellor
    }
}

/// A case record stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Unique identifier.
    pub id: CaseId,
    /// Current lifecycle status.
    pub status: CaseStatus,
    /// Assigned counsellor, if any. Absent means unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_counsellor_id: Option<CounsellorId>,
    /// Topic selected at intake. Absent is treated as "general".
    #[serde(default)]
    pub case_topic: Option<String>,
    /// Comma-joined tag list describing required expertise.
    #[serde(default)]
    pub specialization_needed: Option<String>,
    /// Preferred language of the survivor.
    #[serde(default)]
    pub preferred_language: Option<String>,
    /// Complexity tier, set at intake.
    #[serde(default)]
    pub complexity: Option<Complexity>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
