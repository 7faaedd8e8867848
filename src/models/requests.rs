use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CandidateContact, MatchCriteria};

/// Request to pick the best existing contact for a submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchContactRequest {
    #[validate(nested)]
    pub criteria: MatchCriteria,
    #[validate(nested)]
    #[serde(default)]
    pub candidates: Vec<CandidateContact>,
    #[validate(range(max = 100))]
    #[serde(alias = "min_confidence", rename = "minConfidence", default)]
    pub min_confidence: Option<u8>,
}

/// Request to build the candidate search query for a submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQueryRequest {
    #[validate(nested)]
    pub criteria: MatchCriteria,
}
