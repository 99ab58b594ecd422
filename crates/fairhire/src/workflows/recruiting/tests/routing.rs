use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::recruiting::{
    AuditSink, CompliancePolicy, InMemoryAuditLog, RecruitingService,
};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn list_candidates_returns_seed_roster() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(get("/api/v1/candidates"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 5);
    assert_eq!(payload["items"][0]["id"], "c-1");
}

#[tokio::test]
async fn unknown_candidate_returns_not_found() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(get("/api/v1/candidates/c-404"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "candidate c-404 not found");
}

#[tokio::test]
async fn shortlist_route_exposes_entries_and_compliance() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(get("/api/v1/job-descriptions/jd-1/shortlist"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["dei_compliant"], true);
    assert_eq!(payload["entries"][0]["id"], "c-1");
    assert_eq!(payload["entries"][0]["match"]["score"], 77);
}

#[tokio::test]
async fn close_without_reason_on_non_compliant_shortlist_is_unprocessable() {
    let (service, _, _) = build_service_with_policy(strict_policy());
    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/job-descriptions/jd-2/shortlist/close",
            json!({}),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn bodyless_close_of_compliant_shortlist_takes_standard_path() {
    let (service, _, audit) = build_service();
    let response = router_with_service(service)
        .oneshot(
            Request::post("/api/v1/job-descriptions/jd-1/shortlist/close")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["closure"]["path"], "standard");
    assert_eq!(payload["audit_entry"]["action"], "shortlist_closed");
    assert_eq!(payload["audit_entry"]["user"], "system");
    assert_eq!(audit.entries().expect("audit entries").len(), 4);
}

#[tokio::test]
async fn bodyless_close_of_non_compliant_shortlist_is_still_guarded() {
    let (service, _, _) = build_service_with_policy(strict_policy());
    let response = router_with_service(service)
        .oneshot(
            Request::post("/api/v1/job-descriptions/jd-2/shortlist/close")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn close_with_reason_returns_audit_entry() {
    let (service, _, _) = build_service_with_policy(strict_policy());
    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/job-descriptions/jd-2/shortlist/close",
            json!({ "override_reason": "Specialist role", "user": "maria" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["closure"]["path"], "override");
    assert_eq!(payload["audit_entry"]["action"], "override_triggered");
    assert_eq!(payload["audit_entry"]["override_reason"], "Specialist role");
}

#[tokio::test]
async fn create_job_description_validates_payload() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let rejected = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/job-descriptions",
            json!({ "title": "Engineer", "company": "Acme", "requirements": [] }),
        ))
        .await
        .expect("route executes");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let created = router
        .oneshot(json_request(
            "POST",
            "/api/v1/job-descriptions",
            json!({
                "title": "Engineer",
                "company": "Acme",
                "requirements": [{ "text": "Rust", "type": "must" }],
                "user": "maria",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["id"], "jd-3");
}

#[tokio::test]
async fn inclusivity_route_reports_terms() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/job-descriptions/inclusivity",
            json!({
                "title": "Rockstar Engineer",
                "company": "Acme",
                "requirements": [{ "text": "Rust", "type": "must" }],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["issues"][0]["term"], "rockstar");
}

#[tokio::test]
async fn match_route_scores_candidate_against_job() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(get("/api/v1/candidates/c-2/match/jd-2"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], 77);
    assert_eq!(payload["must_matched"], 2);
}

#[tokio::test]
async fn export_route_sets_attachment_header() {
    let (service, _, _) = build_service();
    let response = router_with_service(service)
        .oneshot(get("/api/v1/export"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .expect("content disposition");
    assert!(disposition.starts_with("attachment; filename=\"recruiting-export-"));

    let payload = read_json_body(response).await;
    assert_eq!(payload["audit_log"][0]["id"], "a-3");
    assert!(payload.get("export_date").is_some());
}

#[tokio::test]
async fn reset_route_restores_seed() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates",
            json!({ "name": "Ana Lima" }),
        ))
        .await
        .expect("route executes");

    let reset = router
        .clone()
        .oneshot(Request::post("/api/v1/reset").body(Body::empty()).expect("request"))
        .await
        .expect("route executes");
    assert_eq!(reset.status(), StatusCode::OK);

    let listed = router
        .oneshot(get("/api/v1/candidates"))
        .await
        .expect("route executes");
    assert_eq!(read_json_body(listed).await["total"], 5);
}

#[tokio::test]
async fn pipeline_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(RecruitingService::new(
        Arc::new(UnavailableRepository),
        Arc::new(InMemoryAuditLog::default()),
        CompliancePolicy::default(),
    ));

    let response = crate::workflows::recruiting::router::pipeline_stats_handler::<
        UnavailableRepository,
        InMemoryAuditLog,
    >(State(service))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
