//! Workload accessor: per-counsellor case counts.

use casework_core::CounsellorId;
use casework_store::CaseStatus;
use serde::Serialize;

use crate::directory::CaseDirectory;
use crate::error::Result;

/// A read-time snapshot of one counsellor's case load.
///
/// Not transactionally consistent with concurrent writes; the counts
/// reflect store state at the instant of the two queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSnapshot {
    /// The counsellor these counts belong to.
    pub counsellor_id: CounsellorId,
    /// Cases with status `new` or `inProgress`.
    pub open_cases: u32,
    /// Cases with status `closed`.
    pub closed_cases: u32,
    /// `open_cases + closed_cases`.
    pub total_cases: u32,
}

/// Fetch the workload snapshot for one counsellor.
///
/// Issues two queries (open and closed) concurrently. A counsellor with no
/// assigned cases yields an all-zero snapshot; that is a valid result, not
/// an error.
///
/// # Errors
///
/// Propagates store read failures unmodified. No retry is attempted here;
/// retry policy, if any, belongs to the caller.
pub async fn counsellor_workload<D: CaseDirectory + ?Sized>(
    directory: &D,
    counsellor_id: &CounsellorId,
) -> Result<WorkloadSnapshot> {
    let open_statuses = CaseStatus::open_statuses();
    let closed_statuses = [CaseStatus::Closed];
    let (open_cases, closed_cases) = futures::try_join!(
        directory.count_cases(counsellor_id, &open_statuses),
        directory.count_cases(counsellor_id, &closed_statuses),
    )?;

    Ok(WorkloadSnapshot {
        counsellor_id: counsellor_id.clone(),
        open_cases,
        closed_cases,
        total_cases: open_cases + closed_cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::mock::StaticDirectory;
    use crate::error::MatchError;

    #[tokio::test]
    async fn counts_open_and_closed_separately() {
        let directory = StaticDirectory::new();
        let id = CounsellorId::parse("c1").unwrap();
        directory.set_open_cases(&id, 3);
        directory.set_closed_cases(&id, 4);

        let snapshot = counsellor_workload(&directory, &id).await.unwrap();
        assert_eq!(snapshot.open_cases, 3);
        assert_eq!(snapshot.closed_cases, 4);
        assert_eq!(snapshot.total_cases, 7);
    }

    #[tokio::test]
    async fn unknown_counsellor_yields_zero_snapshot() {
        let directory = StaticDirectory::new();
        let id = CounsellorId::parse("c9").unwrap();

        let snapshot = counsellor_workload(&directory, &id).await.unwrap();
        assert_eq!(
            snapshot,
            WorkloadSnapshot {
                counsellor_id: id,
                open_cases: 0,
                closed_cases: 0,
                total_cases: 0,
            }
        );
    }

    #[tokio::test]
    async fn store_failure_surfaces_instead_of_zeroes() {
        let directory = StaticDirectory::new();
        directory.set_failing(true);
        let id = CounsellorId::parse("c1").unwrap();

        let err = counsellor_workload(&directory, &id).await.unwrap_err();
        assert!(matches!(err, MatchError::Store(_)));
    }
}
