//! Core types and utilities for casework.
//!
//! This crate provides the foundational types used throughout the casework
//! platform:
//!
//! - **Identifiers**: Strongly-typed IDs for counsellors and cases
//!
//! # Example
//!
//! ```
//! use casework_core::{CounsellorId, CaseId};
//!
//! // Counsellor IDs come from the user directory and are opaque strings
//! let counsellor_id = CounsellorId::parse("usr_7f3a91c2").unwrap();
//!
//! // Case IDs are minted locally on intake
//! let case_id = CaseId::generate();
//! assert!(!case_id.as_str().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;

pub use ids::{CaseId, CounsellorId, IdError};
