//! Case assignment and workload advisor.
//!
//! Given the current counsellor roster and case records, this crate answers
//! three questions for the case-management flows:
//!
//! - Who is the most suitable counsellor for this case right now?
//! - Which counsellors form the candidate pool for this case topic?
//! - How loaded is this counsellor?
//!
//! # Architecture
//!
//! ```text
//!                    +--------------+
//!                    | MatchAdvisor |            facade (advisor)
//!                    +------+-------+
//!                           |
//!        +---------------+--+-----------+----------------+
//!        |               |              |                |
//!   workload        candidate        select           pool
//!  (snapshot)    (capacity filter)  (score + rank)  (topic fallback)
//!        |               |              |
//!        +-------+-------+              |
//!                |                   score
//!         +------+------+          (pure fn)
//!         | CaseDirectory |
//!         +------+------+
//!                |
//!          casework-store
//! ```
//!
//! All data access goes through the [`CaseDirectory`] trait, so matching
//! logic is testable without a database. Decisions are advisory snapshots:
//! nothing here reserves capacity or writes an assignment, and two
//! concurrent callers may be advised the same counsellor.
//!
//! The crate carries two deliberately distinct matching strategies. The
//! scored-ranking path ([`MatchAdvisor::find_best_counsellor`]) uses
//! bidirectional substring matching on specialization tags; the
//! pool-restriction path ([`MatchAdvisor::candidate_pool`]) matches a tag
//! only when it is contained in the topic. See [`pool`] for why.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use casework_match::{CaseNeeds, MatchAdvisor, StoreDirectory};
//! use casework_store::{Complexity, RocksStore};
//!
//! # async fn example() -> casework_match::Result<()> {
//! let store = Arc::new(RocksStore::open("/tmp/casework-db").unwrap());
//! let advisor = MatchAdvisor::with_defaults(Arc::new(StoreDirectory::new(store)));
//!
//! let needs = CaseNeeds::new()
//!     .with_specialization("trauma")
//!     .with_language("en")
//!     .with_complexity(Complexity::High);
//!
//! match advisor.find_best_counsellor(&needs).await? {
//!     Some(best) => println!("assign to {}", best.candidate.profile.id),
//!     None => println!("no capacity; assign manually"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! The `test-utils` feature exposes `mock::StaticDirectory`, a scriptable
//! [`CaseDirectory`] with injectable failures and delays.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod advisor;
pub mod candidate;
pub mod directory;
pub mod error;
pub mod needs;
pub mod pool;
pub mod score;
pub mod select;
pub mod workload;

pub use advisor::{AdvisorConfig, MatchAdvisor};
pub use candidate::{filter_eligible, MatchCandidate};
pub use directory::{CaseDirectory, StoreDirectory};
pub use error::{MatchError, Result};
pub use needs::CaseNeeds;
pub use pool::resolve_candidate_pool;
pub use score::score;
pub use select::{select_best, ScoredCandidate};
pub use workload::{counsellor_workload, WorkloadSnapshot};

#[cfg(any(test, feature = "test-utils"))]
pub use directory::mock;
