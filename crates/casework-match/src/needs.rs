//! The attributes a case requires from its counsellor.

use casework_store::{CaseRecord, Complexity};
use serde::{Deserialize, Serialize};

/// The matching-relevant attributes of a case.
///
/// Built from a [`CaseRecord`] or assembled directly by an intake flow that
/// has not persisted the case yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseNeeds {
    /// Comma-joined tag list describing required expertise.
    #[serde(default)]
    pub specialization_needed: Option<String>,
    /// Topic selected at intake. Absent is treated as "general".
    #[serde(default)]
    pub case_topic: Option<String>,
    /// Preferred language of the survivor.
    #[serde(default)]
    pub preferred_language: Option<String>,
    /// Complexity tier.
    #[serde(default)]
    pub complexity: Option<Complexity>,
}

impl CaseNeeds {
    /// Create empty needs: a general case with no preference signals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the required specialization tag list (comma-joined).
    #[must_use]
    pub fn with_specialization(mut self, tags: impl Into<String>) -> Self {
        self.specialization_needed = Some(tags.into());
        self
    }

    /// Set the case topic.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.case_topic = Some(topic.into());
        self
    }

    /// Set the preferred language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.preferred_language = Some(language.into());
        self
    }

    /// Set the complexity tier.
    #[must_use]
    pub const fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }

    /// The required tags, comma-split, trimmed, lower-cased, and
    /// de-duplicated. Each distinct tag scores at most once.
    #[must_use]
    pub fn need_tags(&self) -> Vec<String> {
        let Some(raw) = &self.specialization_needed else {
            return Vec::new();
        };
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.split(',') {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

impl From<&CaseRecord> for CaseNeeds {
    fn from(record: &CaseRecord) -> Self {
        Self {
            specialization_needed: record.specialization_needed.clone(),
            case_topic: record.case_topic.clone(),
            preferred_language: record.preferred_language.clone(),
            complexity: record.complexity,
        }
    }
}
