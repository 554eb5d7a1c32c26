//! Topic fallback resolver: pool restriction for the case-creation flow.
//!
//! This is the second of the system's two matching strategies. Unlike the
//! scorer, which ranks every candidate and uses bidirectional substring
//! matching, this resolver hard-restricts the pool and matches a tag only
//! when it is contained in the topic (asymmetric). The two strategies
//! evolved separately and are deliberately kept distinct; do not unify the
//! containment directions.

use casework_store::CounsellorProfile;

use crate::needs::CaseNeeds;

/// Resolve the candidate pool for a case topic.
///
/// - Absent or `"general"` topic: the whole roster.
/// - Otherwise, counsellors whose specialization contains the topic exactly
///   or contains any tag that is a case-insensitive substring of the topic.
/// - If no specialist matches, the in-house fallback set: counsellors with
///   no specialization or a general tag.
///
/// An empty result means no automatic pool could be formed; the caller
/// falls back to manual assignment. Role/active filtering is the caller's
/// job (the roster here is already the active matching roster).
#[must_use]
pub fn resolve_candidate_pool(
    roster: &[CounsellorProfile],
    needs: &CaseNeeds,
) -> Vec<CounsellorProfile> {
    let topic = needs
        .case_topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("general"));

    let Some(topic) = topic else {
        return roster.to_vec();
    };
    let topic_lower = topic.to_lowercase();

    let matched: Vec<CounsellorProfile> = roster
        .iter()
        .filter(|p| {
            p.specialization
                .tags()
                .iter()
                .any(|tag| tag.as_str() == topic || topic_lower.contains(&tag.to_lowercase()))
        })
        .cloned()
        .collect();

    if !matched.is_empty() {
        return matched;
    }

    roster
        .iter()
        .filter(|p| p.specialization.is_general())
        .cloned()
        .collect()
}
