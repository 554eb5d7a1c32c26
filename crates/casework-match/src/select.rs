//! Best-match selector: rank scored candidates and pick the winner.

use tracing::debug;

use crate::candidate::MatchCandidate;
use crate::needs::CaseNeeds;
use crate::score::score;

/// A candidate together with its computed match score.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// The candidate that was scored.
    pub candidate: MatchCandidate,
    /// The additive suitability score.
    pub match_score: u32,
}

/// Score every candidate and return the best, or `None` for an empty pool.
///
/// The sort is stable and descending by score, so candidates with equal
/// scores keep their input order and the earlier one wins. `None` is the
/// explicit "no counsellor available" signal, not an error; the caller
/// falls back to manual assignment.
#[must_use]
pub fn select_best(candidates: Vec<MatchCandidate>, needs: &CaseNeeds) -> Option<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let match_score = score(&candidate, needs);
            debug!(
                counsellor_id = %candidate.profile.id,
                match_score,
                "Scored candidate"
            );
            ScoredCandidate {
                candidate,
                match_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.into_iter().next()
}
