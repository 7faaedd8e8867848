// Core algorithm exports
pub mod aliases;
pub mod matcher;
pub mod query;
pub mod scoring;
pub mod similarity;

pub use aliases::{are_aliases, FIRST_NAME_ALIASES};
pub use matcher::{fields_to_update, ContactMatcher};
pub use query::{build_search_query, escape_soql, MatchError, SearchQueryBuilder};
pub use scoring::{calculate_confidence_score, calculate_match_score, evaluate_matched_fields};
pub use similarity::{digits_only, fuzzy_first_name_match, levenshtein_distance, levenshtein_similarity, normalize};
