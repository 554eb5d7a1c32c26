//! Advisor facade: the entry points consumers call.
//!
//! Case-creation and dashboard flows invoke these as plain function calls;
//! there is no RPC boundary. Every call recomputes from current store
//! contents. Two concurrent callers may both select the same counsellor;
//! the assignment write is last-writer-wins and happens outside this
//! subsystem.

use std::sync::Arc;
use std::time::Duration;

use casework_core::CounsellorId;
use casework_store::CounsellorProfile;
use tracing::info;

use crate::candidate::filter_eligible;
use crate::directory::CaseDirectory;
use crate::error::{MatchError, Result};
use crate::needs::CaseNeeds;
use crate::pool::resolve_candidate_pool;
use crate::select::{select_best, ScoredCandidate};
use crate::workload::{counsellor_workload, WorkloadSnapshot};

/// Configuration for the advisor.
#[derive(Debug, Clone, Default)]
pub struct AdvisorConfig {
    /// Upper bound on the per-decision workload fan-out. `None` defers
    /// entirely to the caller's own cancellation.
    pub workload_timeout: Option<Duration>,
}

impl AdvisorConfig {
    /// Config with a workload fan-out deadline.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            workload_timeout: Some(timeout),
        }
    }
}

/// The case assignment and workload advisor.
///
/// Stateless apart from its directory handle and config; safe to share
/// across request handlers.
pub struct MatchAdvisor<D> {
    directory: Arc<D>,
    config: AdvisorConfig,
}

impl<D: CaseDirectory> MatchAdvisor<D> {
    /// Create a new advisor over the given directory.
    #[must_use]
    pub fn new(directory: Arc<D>, config: AdvisorConfig) -> Self {
        Self { directory, config }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults(directory: Arc<D>) -> Self {
        Self::new(directory, AdvisorConfig::default())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Apply the configured deadline to a directory-reading future.
    async fn bounded<T>(&self, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        match self.config.workload_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| MatchError::Timeout(limit))?,
            None => fut.await,
        }
    }

    /// Find the most suitable counsellor for a case, or `None` when no one
    /// has remaining capacity.
    ///
    /// This is the scored-ranking path: the full active roster is filtered
    /// by capacity, every survivor is scored against the needs, and the
    /// stable-sorted top candidate wins.
    ///
    /// # Errors
    ///
    /// Propagates store read failures and fan-out timeouts; never retries.
    pub async fn find_best_counsellor(&self, needs: &CaseNeeds) -> Result<Option<ScoredCandidate>> {
        let roster = self.directory.active_counsellors().await?;
        let candidates = self
            .bounded(filter_eligible(self.directory.as_ref(), &roster))
            .await?;

        if candidates.is_empty() {
            info!(
                roster_size = roster.len(),
                "No counsellor with remaining capacity"
            );
            return Ok(None);
        }

        let best = select_best(candidates, needs);
        if let Some(best) = &best {
            info!(
                counsellor_id = %best.candidate.profile.id,
                match_score = best.match_score,
                remaining_capacity = best.candidate.remaining_capacity,
                "Selected best counsellor"
            );
        }
        Ok(best)
    }

    /// Resolve the candidate pool for a case topic.
    ///
    /// This is the pool-restriction path used by the case-creation form. It
    /// does not score or check capacity; it only narrows the roster by
    /// topic, with the in-house fallback when no specialist matches.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub async fn candidate_pool(&self, needs: &CaseNeeds) -> Result<Vec<CounsellorProfile>> {
        let roster = self.directory.active_counsellors().await?;
        let pool = resolve_candidate_pool(&roster, needs);

        info!(
            topic = needs.case_topic.as_deref().unwrap_or("general"),
            roster_size = roster.len(),
            pool_size = pool.len(),
            "Resolved candidate pool"
        );
        Ok(pool)
    }

    /// Fetch the workload snapshot for one counsellor.
    ///
    /// # Errors
    ///
    /// Propagates store read failures and the configured deadline.
    pub async fn workload(&self, counsellor_id: &CounsellorId) -> Result<WorkloadSnapshot> {
        self.bounded(counsellor_workload(self.directory.as_ref(), counsellor_id))
            .await
    }
}
