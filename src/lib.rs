//! Contact Match - decides whether a web-form submission belongs to an existing CRM contact
//!
//! This library provides the contact matching engine used by the forms backend.
//! Candidates fetched from the CRM are scored with weighted field matches,
//! fuzzy first-name comparison and a nickname table.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{ContactMatcher, MatchError, SearchQueryBuilder, build_search_query};
pub use models::{CandidateContact, MatchCriteria, MatchResult, MatchWeights, MatchedField};
