//! Match scorer: suitability of one candidate for one case.
//!
//! The score is a plain additive integer; every term is independent and
//! order-insensitive. Ties are possible and are resolved by the selector's
//! stable ordering, not here.

use casework_store::{Complexity, ExperienceLevel};

use crate::candidate::MatchCandidate;
use crate::needs::CaseNeeds;

/// Points per distinct matched need-tag.
pub const SPECIALIZATION_MATCH_POINTS: u32 = 10;
/// Points when the candidate speaks the preferred language.
pub const LANGUAGE_MATCH_POINTS: u32 = 5;
/// Points per free slot of remaining capacity.
pub const CAPACITY_POINTS_PER_SLOT: u32 = 2;
/// Points for a senior counsellor on a high-complexity case.
pub const HIGH_SENIOR_POINTS: u32 = 8;
/// Points for an intermediate counsellor on a medium-complexity case.
pub const MEDIUM_INTERMEDIATE_POINTS: u32 = 5;

/// Compute the suitability score of a candidate for the given needs.
///
/// Terms:
///
/// 1. Specialization overlap: each distinct need-tag that matches any
///    candidate tag scores [`SPECIALIZATION_MATCH_POINTS`], where "matches"
///    is bidirectional substring containment on lower-cased tags. A
///    need-tag counts at most once however many candidate tags it matches.
/// 2. Language: [`LANGUAGE_MATCH_POINTS`] if the preferred language is one
///    of the candidate's languages.
/// 3. Capacity headroom: [`CAPACITY_POINTS_PER_SLOT`] per remaining slot,
///    deliberate pressure toward less-loaded counsellors.
/// 4. Complexity/experience pairing: high+senior and medium+intermediate
///    score; low complexity never grants a bonus regardless of experience.
///
/// Pure function of its two inputs.
#[must_use]
pub fn score(candidate: &MatchCandidate, needs: &CaseNeeds) -> u32 {
    let mut total = 0;

    let candidate_tags: Vec<String> = candidate
        .profile
        .specialization
        .tags()
        .iter()
        .map(|t| t.to_lowercase())
        .collect();
    for need_tag in needs.need_tags() {
        let matched = candidate_tags
            .iter()
            .any(|tag| tag.contains(&need_tag) || need_tag.contains(tag.as_str()));
        if matched {
            total += SPECIALIZATION_MATCH_POINTS;
        }
    }

    if let Some(language) = &needs.preferred_language {
        if candidate.profile.languages.iter().any(|l| l == language) {
            total += LANGUAGE_MATCH_POINTS;
        }
    }

    total += CAPACITY_POINTS_PER_SLOT * candidate.remaining_capacity;

    match (needs.complexity, candidate.profile.experience_level) {
        (Some(Complexity::High), Some(ExperienceLevel::Senior)) => total += HIGH_SENIOR_POINTS,
        (Some(Complexity::Medium), Some(ExperienceLevel::Intermediate)) => {
            total += MEDIUM_INTERMEDIATE_POINTS;
        }
        _ => {}
    }

    total
}
