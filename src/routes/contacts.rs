use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::{MatchingSettings, Settings};
use crate::core::{ContactMatcher, MatchError, SearchQueryBuilder};
use crate::models::{
    ErrorResponse, HealthResponse, MatchContactRequest, MatchContactResponse, SearchQueryRequest,
    SearchQueryResponse,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: ContactMatcher,
    pub query_builder: SearchQueryBuilder,
    pub matching: MatchingSettings,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            matcher: ContactMatcher::new(
                settings.match_weights(),
                settings.matching.fuzzy_name_threshold,
            ),
            query_builder: SearchQueryBuilder::new(
                settings.crm.contact_object.clone(),
                settings.crm.secondary_email_field.clone(),
                settings.crm.query_limit,
            ),
            matching: settings.matching.clone(),
        }
    }
}

/// Configure all contact-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/contacts/match", web::post().to(match_contact))
        .route("/contacts/search-query", web::post().to(search_query));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match contact endpoint
///
/// POST /api/v1/contacts/match
///
/// Request body:
/// ```json
/// {
///   "criteria": { "email": "string", "firstName": "string", "zip": "string" },
///   "candidates": [{ "Id": "string", "Email": "string", "MailingPostalCode": "string" }],
///   "minConfidence": 70
/// }
/// ```
async fn match_contact(
    state: web::Data<AppState>,
    req: web::Json<MatchContactRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let total_candidates = req.candidates.len();
    if total_candidates > state.matching.max_candidates {
        tracing::warn!(
            "Rejected match request with {} candidates (max {})",
            total_candidates,
            state.matching.max_candidates
        );
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Too many candidates".to_string(),
            message: format!(
                "At most {} candidates may be submitted per request",
                state.matching.max_candidates
            ),
            status_code: 400,
        });
    }

    let min_confidence = req
        .min_confidence
        .unwrap_or(state.matching.default_min_confidence);

    let scored = state.matcher.score_candidates(&req.criteria, &req.candidates);
    let candidates_considered = scored.len();
    let best_match = state.matcher.select_best(&req.criteria, scored, min_confidence);

    match &best_match {
        Some(result) => tracing::info!(
            "Matched contact {} with confidence {} (from {} candidates)",
            result.contact_id,
            result.confidence_score,
            total_candidates
        ),
        None => tracing::info!(
            "No contact reached confidence {} ({} of {} candidates scored)",
            min_confidence,
            candidates_considered,
            total_candidates
        ),
    }

    HttpResponse::Ok().json(MatchContactResponse {
        best_match,
        candidates_considered,
        total_candidates,
    })
}

/// Search query endpoint
///
/// POST /api/v1/contacts/search-query
///
/// Returns the SOQL filter and full statement the caller runs to fetch candidates.
async fn search_query(
    state: web::Data<AppState>,
    req: web::Json<SearchQueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for search query request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let built = state
        .query_builder
        .where_clause(&req.criteria)
        .and_then(|where_clause| {
            let soql = state.query_builder.build_soql(&req.criteria)?;
            Ok(SearchQueryResponse { where_clause, soql })
        });

    match built {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(MatchError::InvalidCriteria(message)) => {
            tracing::warn!("Search query requested without searchable criteria");
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_criteria".to_string(),
                message,
                status_code: 400,
            })
        }
    }
}
