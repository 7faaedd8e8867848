use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the contact match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchContactResponse {
    #[serde(rename = "match")]
    pub best_match: Option<MatchResult>,
    #[serde(rename = "candidatesConsidered")]
    pub candidates_considered: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the search query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQueryResponse {
    #[serde(rename = "where")]
    pub where_clause: String,
    pub soql: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
