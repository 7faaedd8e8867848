// Integration tests for Contact Match

use actix_web::{test, web, App};
use contact_match::config::Settings;
use contact_match::core::ContactMatcher;
use contact_match::models::{CandidateContact, MatchCriteria, MatchedField};
use contact_match::routes::{self, contacts::AppState};
use serde_json::{json, Value};

fn create_test_contact(id: &str, first: &str, last: &str, email: &str, phone: &str) -> CandidateContact {
    CandidateContact {
        id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        ..Default::default()
    }
}

fn criteria(email: Option<&str>, phone: Option<&str>, first: Option<&str>, last: Option<&str>) -> MatchCriteria {
    MatchCriteria {
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
        first_name: first.map(str::to_string),
        last_name: last.map(str::to_string),
        ..Default::default()
    }
}

#[::core::prelude::v1::test]
fn test_integration_exact_identity_scores_80() {
    let matcher = ContactMatcher::with_default_weights();
    let candidates = vec![create_test_contact("003A", "John", "Doe", "test@example.com", "555-1234")];
    let criteria = criteria(Some("test@example.com"), Some("555-1234"), Some("John"), Some("Doe"));

    let result = matcher.find_best_match(&criteria, &candidates, 70).unwrap();

    assert_eq!(result.confidence_score, 80);
    assert_eq!(
        result.matched_fields,
        vec![MatchedField::Email, MatchedField::Phone, MatchedField::FirstName, MatchedField::LastName]
    );
}

#[::core::prelude::v1::test]
fn test_inputs_are_not_mutated() {
    let matcher = ContactMatcher::default();
    let candidates = vec![
        create_test_contact("003A", "John", "Doe", "test@example.com", "555-1234"),
        create_test_contact("003B", "Jane", "Doe", "jane@example.com", "555-0000"),
    ];
    let criteria = MatchCriteria {
        street: Some("1 Elm St".to_string()),
        ..criteria(Some("test@example.com"), None, Some("John"), None)
    };
    let candidates_before = candidates.clone();
    let criteria_before = criteria.clone();

    let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();

    assert!(result.fields_to_update.is_some());
    assert_eq!(candidates, candidates_before);
    assert_eq!(criteria, criteria_before);
}

#[::core::prelude::v1::test]
fn test_empty_candidates_never_match() {
    let matcher = ContactMatcher::default();
    let criteria = criteria(Some("test@example.com"), None, None, None);

    for threshold in [0, 20, 70, 100] {
        assert!(matcher.find_best_match(&criteria, &[], threshold).is_none());
    }
}

#[::core::prelude::v1::test]
fn test_phone_is_punctuation_insensitive() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "Ana", "Lee", "ana@example.com", "555-123-4567")];
    let criteria = criteria(None, Some("(555) 123-4567"), None, None);

    let result = matcher.find_best_match(&criteria, &candidates, 25).unwrap();
    assert_eq!(result.matched_fields, vec![MatchedField::Phone]);
}

#[::core::prelude::v1::test]
fn test_email_is_case_insensitive() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "John", "Doe", "john.doe@example.com", "")];
    let criteria = criteria(Some("JOHN.DOE@EXAMPLE.COM"), None, None, None);

    let result = matcher.find_best_match(&criteria, &candidates, 25).unwrap();
    assert_eq!(result.matched_fields, vec![MatchedField::Email]);
}

#[::core::prelude::v1::test]
fn test_nicknames_match_after_identifying_field() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "William", "Smith", "ws@example.com", "555-0101")];

    for nickname in ["Will", "Bill"] {
        let criteria = criteria(Some("ws@example.com"), None, Some(nickname), Some("Smith"));
        let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();
        assert_eq!(
            result.matched_fields,
            vec![MatchedField::Email, MatchedField::FirstName, MatchedField::LastName]
        );
        assert_eq!(result.confidence_score, 55);
    }
}

#[::core::prelude::v1::test]
fn test_close_spelling_matches_after_identifying_field() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "John", "Doe", "jd@example.com", "555-0101")];
    let criteria = criteria(None, Some("5550101"), Some("Jon"), None);

    let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();
    assert_eq!(result.matched_fields, vec![MatchedField::Phone, MatchedField::FirstName]);
}

#[::core::prelude::v1::test]
fn test_one_edit_first_name_matches_after_email() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "Jonathan", "Doe", "jd@example.com", "555-0101")];
    let criteria = criteria(Some("jd@example.com"), None, Some("Jonathon"), None);

    let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();
    assert_eq!(result.matched_fields, vec![MatchedField::Email, MatchedField::FirstName]);
    assert_eq!(result.confidence_score, 40);
}

#[::core::prelude::v1::test]
fn test_distant_first_name_does_not_match_after_email() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "Maria", "Lopez", "ml@example.com", "555-0101")];
    let criteria = criteria(Some("ml@example.com"), None, Some("Mary"), None);

    let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();
    assert_eq!(result.matched_fields, vec![MatchedField::Email]);
    assert_eq!(result.confidence_score, 25);
}

#[::core::prelude::v1::test]
fn test_names_alone_do_not_match() {
    let matcher = ContactMatcher::default();
    let candidates = vec![create_test_contact("003A", "John", "Doe", "other@example.com", "555-9999")];
    let criteria = criteria(None, None, Some("John"), Some("Doe"));

    assert!(matcher.score_candidates(&criteria, &candidates).is_empty());
    assert!(matcher.find_best_match(&criteria, &candidates, 70).is_none());
    assert!(matcher.find_best_match(&criteria, &candidates, 0).is_none());
}

#[::core::prelude::v1::test]
fn test_fields_to_update_fills_empty_address() {
    let matcher = ContactMatcher::default();
    let candidates = vec![CandidateContact {
        id: "003A".to_string(),
        first_name: Some("Rosa".to_string()),
        last_name: Some("Park".to_string()),
        email: Some("rosa@example.com".to_string()),
        mailing_city: Some("Portland".to_string()),
        mailing_state: Some("OR".to_string()),
        ..Default::default()
    }];
    let criteria = MatchCriteria {
        email: Some("rosa@example.com".to_string()),
        street: Some("999 Pine St".to_string()),
        city: Some("Portland".to_string()),
        state: Some("OR".to_string()),
        zip: Some("97201".to_string()),
        ..Default::default()
    };

    let result = matcher.find_best_match(&criteria, &candidates, 0).unwrap();
    let updates = result.fields_to_update.unwrap();

    assert_eq!(updates.len(), 2);
    assert_eq!(updates["mailingStreet"], "999 Pine St");
    assert_eq!(updates["mailingPostalCode"], "97201");
    assert_eq!(
        result.matched_fields,
        vec![MatchedField::Email, MatchedField::City, MatchedField::State]
    );
}

#[::core::prelude::v1::test]
fn test_selection_is_order_independent_except_ties() {
    let matcher = ContactMatcher::default();
    let strong = create_test_contact("strong", "John", "Doe", "test@example.com", "555-1234");
    let weak = create_test_contact("weak", "Jim", "Roe", "test@example.com", "555-0000");
    let criteria = criteria(Some("test@example.com"), Some("555-1234"), Some("John"), Some("Doe"));

    let forward = vec![strong.clone(), weak.clone()];
    let backward = vec![weak, strong];
    assert_eq!(matcher.find_best_match(&criteria, &forward, 0).unwrap().contact_id, "strong");
    assert_eq!(matcher.find_best_match(&criteria, &backward, 0).unwrap().contact_id, "strong");

    let twin_a = create_test_contact("twin-a", "John", "Doe", "test@example.com", "555-1234");
    let twin_b = create_test_contact("twin-b", "John", "Doe", "test@example.com", "555-1234");
    let ab = vec![twin_a.clone(), twin_b.clone()];
    let ba = vec![twin_b, twin_a];
    assert_eq!(matcher.find_best_match(&criteria, &ab, 0).unwrap().contact_id, "twin-a");
    assert_eq!(matcher.find_best_match(&criteria, &ba, 0).unwrap().contact_id, "twin-b");
}

fn test_state() -> AppState {
    AppState::from_settings(&Settings::default())
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_match_endpoint_returns_best_contact() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({
        "criteria": {
            "email": "Test@Example.com",
            "phone": "555-1234",
            "firstName": "John",
            "lastName": "Doe",
            "zip": "97201"
        },
        "candidates": [
            {"attributes": {"type": "Contact"}, "Id": "003NOPE", "Email": "nobody@example.com"},
            {"Id": "003YES", "FirstName": "John", "LastName": "Doe", "Email": "test@example.com", "Phone": "(555) 1234", "MailingPostalCode": null}
        ]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/match")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["match"]["contactId"], "003YES");
    assert_eq!(body["match"]["contactName"], "John Doe");
    assert_eq!(body["match"]["confidenceScore"], 80);
    assert_eq!(body["match"]["matchedFields"], json!(["email", "phone", "firstName", "lastName"]));
    assert_eq!(body["match"]["fieldsToUpdate"], json!({"mailingPostalCode": "97201"}));
    assert_eq!(body["candidatesConsidered"], 1);
    assert_eq!(body["totalCandidates"], 2);
}

#[actix_web::test]
async fn test_match_endpoint_uses_default_threshold() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    // email alone scores 25, below the default of 70
    let payload = json!({
        "criteria": {"email": "test@example.com"},
        "candidates": [{"Id": "003A", "Email": "test@example.com"}]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/match")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["match"].is_null());
    assert_eq!(body["candidatesConsidered"], 1);
}

#[actix_web::test]
async fn test_match_endpoint_rejects_out_of_range_threshold() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({
        "criteria": {"email": "test@example.com"},
        "candidates": [],
        "minConfidence": 101
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/match")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_query_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/search-query")
        .set_json(json!({"criteria": {"email": "o'brien@example.com"}}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["where"],
        r"(Email = 'o\'brien@example.com' OR Secondary_Email__c = 'o\'brien@example.com')"
    );
    let soql = body["soql"].as_str().unwrap();
    assert!(soql.starts_with("SELECT Id, FirstName, LastName, Email, Secondary_Email__c, Phone"));
    assert!(soql.ends_with("LIMIT 50"));
}

#[actix_web::test]
async fn test_search_query_endpoint_rejects_empty_criteria() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/search-query")
        .set_json(json!({"criteria": {}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_criteria");
}

#[actix_web::test]
async fn test_match_endpoint_rejects_overlong_names() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({
        "criteria": {"email": "test@example.com", "firstName": "a".repeat(6000)},
        "candidates": [{"Id": "003A", "Email": "test@example.com", "FirstName": "b".repeat(6000)}]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/match")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_match_endpoint_rejects_overlong_candidate_name() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({
        "criteria": {"email": "test@example.com", "firstName": "Jane"},
        "candidates": [{"Id": "003A", "Email": "test@example.com", "FirstName": "b".repeat(6000)}]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/match")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_search_query_endpoint_rejects_overlong_values() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state()))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/contacts/search-query")
        .set_json(json!({"criteria": {"zip": "9".repeat(500)}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}
