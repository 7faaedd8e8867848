// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateContact, MatchCriteria, MatchResult, MatchWeights, MatchedField, ScoredCandidate};
pub use requests::{MatchContactRequest, SearchQueryRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchContactResponse, SearchQueryResponse};
