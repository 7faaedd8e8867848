use crate::models::{CandidateContact, MatchCriteria, MatchWeights, MatchedField};
use crate::models::domain::present;
use crate::core::similarity::{digits_only, fuzzy_first_name_match, normalized_eq};

/// Highest confidence score a candidate can reach
pub const MAX_CONFIDENCE: u8 = 100;

/// Evaluate which criteria fields match a candidate
///
/// Fields are checked in a fixed order and each tag appears at most once:
/// email, phone, secondaryEmail, firstName, lastName, street, city, state, zip.
/// Names are only compared once an identifying field (email, phone or
/// secondary email) has matched.
pub fn evaluate_matched_fields(
    criteria: &MatchCriteria,
    candidate: &CandidateContact,
    name_similarity_threshold: f64,
) -> Vec<MatchedField> {
    let mut matched = Vec::with_capacity(9);

    if let Some(email) = criteria.email() {
        let primary = present(&candidate.email).is_some_and(|e| normalized_eq(email, e));
        let secondary = present(&candidate.secondary_email).is_some_and(|e| normalized_eq(email, e));
        if primary || secondary {
            matched.push(MatchedField::Email);
        }
    }

    if let (Some(phone), Some(candidate_phone)) = (criteria.phone(), present(&candidate.phone)) {
        let digits = digits_only(phone);
        if !digits.is_empty() && digits == digits_only(candidate_phone) {
            matched.push(MatchedField::Phone);
        }
    }

    if let (Some(secondary), Some(candidate_secondary)) =
        (criteria.secondary_email(), present(&candidate.secondary_email))
    {
        if normalized_eq(secondary, candidate_secondary) {
            matched.push(MatchedField::SecondaryEmail);
        }
    }

    // Names only add confidence on top of an identifying match
    if matched.iter().any(MatchedField::is_identifying) {
        if let (Some(first), Some(candidate_first)) = (criteria.first_name(), present(&candidate.first_name)) {
            if fuzzy_first_name_match(first, candidate_first, name_similarity_threshold) {
                matched.push(MatchedField::FirstName);
            }
        }

        if let (Some(last), Some(candidate_last)) = (criteria.last_name(), present(&candidate.last_name)) {
            if normalized_eq(last, candidate_last) {
                matched.push(MatchedField::LastName);
            }
        }
    }

    let address = [
        (MatchedField::Street, criteria.street(), &candidate.mailing_street),
        (MatchedField::City, criteria.city(), &candidate.mailing_city),
        (MatchedField::State, criteria.state(), &candidate.mailing_state),
        (MatchedField::Zip, criteria.zip(), &candidate.mailing_postal_code),
    ];
    for (field, wanted, actual) in address {
        if let (Some(wanted), Some(actual)) = (wanted, present(actual)) {
            if normalized_eq(wanted, actual) {
                matched.push(field);
            }
        }
    }

    matched
}

/// Sum the weight of each distinct matched field, clamped to 100
pub fn calculate_confidence_score(matched_fields: &[MatchedField], weights: &MatchWeights) -> u8 {
    let mut seen: Vec<MatchedField> = Vec::with_capacity(matched_fields.len());
    let mut total: u32 = 0;

    for field in matched_fields {
        if seen.contains(field) {
            continue;
        }
        seen.push(*field);
        total += u32::from(weights.weight(*field));
    }

    total.min(u32::from(MAX_CONFIDENCE)) as u8
}

/// Matched fields and confidence score (0-100) for a candidate
pub fn calculate_match_score(
    criteria: &MatchCriteria,
    candidate: &CandidateContact,
    weights: &MatchWeights,
    name_similarity_threshold: f64,
) -> (u8, Vec<MatchedField>) {
    let matched = evaluate_matched_fields(criteria, candidate, name_similarity_threshold);
    let score = calculate_confidence_score(&matched, weights);
    (score, matched)
}
