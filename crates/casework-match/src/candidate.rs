//! Candidate filter: capacity computation over the active roster.

use casework_store::{CaseStatus, CounsellorProfile};
use futures::future;
use tracing::debug;

use crate::directory::CaseDirectory;
use crate::error::Result;

/// A counsellor eligible for assignment, with computed headroom.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    /// The counsellor's profile.
    pub profile: CounsellorProfile,
    /// `max_cases - open_cases` at evaluation time. Always positive for
    /// candidates produced by [`filter_eligible`].
    pub remaining_capacity: u32,
}

/// Filter the roster down to counsellors with remaining capacity.
///
/// The caller is expected to pass only active counsellor-role profiles;
/// violations of that precondition are filtered out again here. One
/// open-case count is fetched per counsellor, fanned out concurrently, and
/// all fetches complete before any candidate is produced. Output preserves
/// the input order.
///
/// # Errors
///
/// Propagates the first store read failure; no retry.
pub async fn filter_eligible<D: CaseDirectory + ?Sized>(
    directory: &D,
    roster: &[CounsellorProfile],
) -> Result<Vec<MatchCandidate>> {
    let matchable: Vec<&CounsellorProfile> =
        roster.iter().filter(|p| p.is_matchable()).collect();

    let open_statuses = CaseStatus::open_statuses();
    let open_counts = future::try_join_all(
        matchable
            .iter()
            .map(|p| directory.count_cases(&p.id, &open_statuses)),
    )
    .await?;

    let mut candidates = Vec::with_capacity(matchable.len());
    for (profile, open_cases) in matchable.into_iter().zip(open_counts) {
        let remaining_capacity = profile.max_cases.saturating_sub(open_cases);
        if remaining_capacity > 0 {
            candidates.push(MatchCandidate {
                profile: profile.clone(),
                remaining_capacity,
            });
        } else {
            debug!(
                counsellor_id = %profile.id,
                open_cases,
                max_cases = profile.max_cases,
                "Counsellor at capacity, excluded"
            );
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::mock::StaticDirectory;
    use casework_core::CounsellorId;
    use casework_store::{Specializations, StaffRole};
    use chrono::Utc;

    fn counsellor(id: &str, max_cases: u32) -> CounsellorProfile {
        CounsellorProfile {
            id: CounsellorId::parse(id).unwrap(),
            name: id.to_string(),
            role: StaffRole::Counsellor,
            is_active: true,
            specialization: Specializations::default(),
            languages: vec![],
            experience_level: None,
            max_cases,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn excludes_counsellors_at_capacity() {
        let directory = StaticDirectory::new();
        let c1 = counsellor("c1", 5);
        let c2 = counsellor("c2", 3);
        directory.set_open_cases(&c1.id, 5);
        directory.set_open_cases(&c2.id, 1);

        let candidates = filter_eligible(&directory, &[c1, c2]).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].profile.id.as_str(), "c2");
        assert_eq!(candidates[0].remaining_capacity, 2);
    }

    #[tokio::test]
    async fn capacity_invariant_holds_for_survivors() {
        let directory = StaticDirectory::new();
        let roster: Vec<_> = (0..4).map(|i| counsellor(&format!("c{i}"), 4)).collect();
        for (i, profile) in roster.iter().enumerate() {
            directory.set_open_cases(&profile.id, u32::try_from(i).unwrap() * 2);
        }

        let candidates = filter_eligible(&directory, &roster).await.unwrap();

        for candidate in &candidates {
            assert!(candidate.remaining_capacity > 0);
            let open = match candidate.profile.id.as_str() {
                "c0" => 0,
                "c1" => 2,
                other => panic!("unexpected survivor {other}"),
            };
            assert_eq!(
                candidate.remaining_capacity,
                candidate.profile.max_cases - open
            );
        }
    }

    #[tokio::test]
    async fn defends_role_and_active_precondition() {
        let directory = StaticDirectory::new();
        let mut admin = counsellor("a1", 5);
        admin.role = StaffRole::Admin;
        let mut inactive = counsellor("c2", 5);
        inactive.is_active = false;
        let ok = counsellor("c1", 5);

        let candidates = filter_eligible(&directory, &[admin, inactive, ok])
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].profile.id.as_str(), "c1");
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let directory = StaticDirectory::new();
        let roster = vec![counsellor("zeta", 2), counsellor("alpha", 2), counsellor("mid", 2)];

        let candidates = filter_eligible(&directory, &roster).await.unwrap();

        let ids: Vec<_> = candidates
            .iter()
            .map(|c| c.profile.id.as_str().to_string())
            .collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn empty_roster_is_empty_not_error() {
        let directory = StaticDirectory::new();
        let candidates = filter_eligible(&directory, &[]).await.unwrap();
        assert!(candidates.is_empty());
    }
}
