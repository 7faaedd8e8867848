use std::collections::BTreeMap;

use crate::models::{CandidateContact, MatchCriteria, MatchResult, MatchWeights, ScoredCandidate};
use crate::models::domain::present;
use crate::core::{
    scoring::calculate_match_score,
    similarity::DEFAULT_NAME_SIMILARITY_THRESHOLD,
};

/// Contact matcher - decides whether a submission belongs to an existing contact
///
/// # Pipeline Stages
/// 1. Field matching per candidate (identifiers, gated names, address)
/// 2. Weighted confidence scoring
/// 3. Stable ranking, ties resolved by candidate order
/// 4. Threshold check and address back-fill suggestion for the winner
#[derive(Debug, Clone)]
pub struct ContactMatcher {
    weights: MatchWeights,
    name_similarity_threshold: f64,
}

impl ContactMatcher {
    pub fn new(weights: MatchWeights, name_similarity_threshold: f64) -> Self {
        Self {
            weights,
            name_similarity_threshold,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(MatchWeights::default(), DEFAULT_NAME_SIMILARITY_THRESHOLD)
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score every candidate that matches at least one field
    ///
    /// The result is sorted by descending score. The sort is stable, so
    /// candidates with equal scores keep their input order.
    pub fn score_candidates<'a>(
        &self,
        criteria: &MatchCriteria,
        candidates: &'a [CandidateContact],
    ) -> Vec<ScoredCandidate<'a>> {
        let mut scored: Vec<ScoredCandidate<'a>> = candidates
            .iter()
            .filter_map(|contact| {
                let (score, matched_fields) = calculate_match_score(
                    criteria,
                    contact,
                    &self.weights,
                    self.name_similarity_threshold,
                );

                if matched_fields.is_empty() {
                    return None;
                }

                tracing::debug!(
                    "Candidate {} scored {} on [{}]",
                    contact.id,
                    score,
                    matched_fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
                );

                Some(ScoredCandidate {
                    contact,
                    matched_fields,
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Find the best matching contact for the criteria
    ///
    /// # Arguments
    /// * `criteria` - Values submitted on the form
    /// * `candidates` - Contacts fetched with the search query
    /// * `min_confidence` - Lowest score (0-100) accepted as a match
    ///
    /// # Returns
    /// The top-ranked candidate if its score reaches `min_confidence`.
    /// Candidates with no matching field are never returned.
    pub fn find_best_match(
        &self,
        criteria: &MatchCriteria,
        candidates: &[CandidateContact],
        min_confidence: u8,
    ) -> Option<MatchResult> {
        let scored = self.score_candidates(criteria, candidates);
        self.select_best(criteria, scored, min_confidence)
    }

    /// Turn a ranked candidate list into the final decision
    pub fn select_best(
        &self,
        criteria: &MatchCriteria,
        scored: Vec<ScoredCandidate<'_>>,
        min_confidence: u8,
    ) -> Option<MatchResult> {
        let best = scored.into_iter().next()?;

        if best.score < min_confidence {
            tracing::debug!(
                "Best candidate {} scored {} below threshold {}",
                best.contact.id,
                best.score,
                min_confidence
            );
            return None;
        }

        Some(MatchResult {
            contact_id: best.contact.id.clone(),
            contact_name: best.contact.display_name(),
            confidence_score: best.score,
            fields_to_update: fields_to_update(criteria, best.contact),
            matched_fields: best.matched_fields,
        })
    }
}

impl Default for ContactMatcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Address fields empty on the contact that the submission can fill
///
/// Keys are the contact field names (mailingStreet, mailingCity,
/// mailingState, mailingPostalCode).
pub fn fields_to_update(
    criteria: &MatchCriteria,
    contact: &CandidateContact,
) -> Option<BTreeMap<String, String>> {
    let slots = [
        ("mailingStreet", criteria.street(), &contact.mailing_street),
        ("mailingCity", criteria.city(), &contact.mailing_city),
        ("mailingState", criteria.state(), &contact.mailing_state),
        ("mailingPostalCode", criteria.zip(), &contact.mailing_postal_code),
    ];

    let updates: BTreeMap<String, String> = slots
        .into_iter()
        .filter(|(_, _, current)| present(current).is_none())
        .filter_map(|(field, value, _)| value.map(|v| (field.to_string(), v.to_string())))
        .collect();

    if updates.is_empty() {
        None
    } else {
        Some(updates)
    }
}
