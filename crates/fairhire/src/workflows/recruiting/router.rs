use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::audit::AuditSink;
use super::compliance::ComplianceViolation;
use super::domain::{
    CandidateDraft, CandidateId, JobDescriptionDraft, JobDescriptionId, OptInTag, SkillLevel,
};
use super::repository::{RecruitingRepository, RepositoryError};
use super::service::{CloseShortlistRequest, RecruitingService, RecruitingServiceError};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterCandidateRequest {
    #[serde(flatten)]
    pub draft: CandidateDraft,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobDescriptionRequest {
    #[serde(flatten)]
    pub draft: JobDescriptionDraft,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddSkillRequest {
    pub name: String,
    #[serde(default)]
    pub level: Option<SkillLevel>,
}

#[derive(Debug, Serialize)]
struct Collection<T> {
    items: Vec<T>,
    total: usize,
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

/// Router builder exposing the recruiting endpoints under `/api/v1`.
pub fn recruiting_router<R, A>(service: Arc<RecruitingService<R, A>>) -> Router
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates",
            get(list_candidates_handler::<R, A>).post(register_candidate_handler::<R, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id",
            get(candidate_handler::<R, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/skills",
            post(add_skill_handler::<R, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/tags",
            post(add_tag_handler::<R, A>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/match/:jd_id",
            get(match_handler::<R, A>),
        )
        .route(
            "/api/v1/job-descriptions",
            get(list_job_descriptions_handler::<R, A>)
                .post(create_job_description_handler::<R, A>),
        )
        .route(
            "/api/v1/job-descriptions/inclusivity",
            post(inclusivity_handler::<R, A>),
        )
        .route(
            "/api/v1/job-descriptions/:jd_id",
            get(job_description_handler::<R, A>),
        )
        .route(
            "/api/v1/job-descriptions/:jd_id/shortlist",
            get(shortlist_handler::<R, A>),
        )
        .route(
            "/api/v1/job-descriptions/:jd_id/shortlist/close",
            post(close_shortlist_handler::<R, A>),
        )
        .route("/api/v1/opportunities", get(opportunities_handler::<R, A>))
        .route("/api/v1/feedback", get(feedback_handler::<R, A>))
        .route("/api/v1/audit-log", get(audit_log_handler::<R, A>))
        .route("/api/v1/pipeline/stats", get(pipeline_stats_handler::<R, A>))
        .route("/api/v1/export", get(export_handler::<R, A>))
        .route("/api/v1/reset", post(reset_handler::<R, A>))
        .with_state(service)
}

pub(crate) async fn list_candidates_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.candidates() {
        Ok(candidates) => (StatusCode::OK, axum::Json(Collection::from(candidates))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_candidate_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    axum::Json(request): axum::Json<RegisterCandidateRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.register_candidate(request.draft, request.user.as_deref()) {
        Ok(candidate) => (StatusCode::CREATED, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.candidate(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_skill_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<AddSkillRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.add_skill(&CandidateId(candidate_id), &request.name, request.level) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_tag_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(candidate_id): Path<String>,
    axum::Json(tag): axum::Json<OptInTag>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.add_opt_in_tag(&CandidateId(candidate_id), tag) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn match_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path((candidate_id, jd_id)): Path<(String, String)>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.evaluate_match(&CandidateId(candidate_id), &JobDescriptionId(jd_id)) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_job_descriptions_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.job_descriptions() {
        Ok(jobs) => (StatusCode::OK, axum::Json(Collection::from(jobs))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_job_description_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    axum::Json(request): axum::Json<CreateJobDescriptionRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.create_job_description(request.draft, request.user.as_deref()) {
        Ok(job) => (StatusCode::CREATED, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inclusivity_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    axum::Json(draft): axum::Json<JobDescriptionDraft>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    let report = service.review_inclusivity(&draft);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn job_description_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(jd_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.job_description(&JobDescriptionId(jd_id)) {
        Ok(job) => (StatusCode::OK, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn shortlist_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(jd_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.shortlist(&JobDescriptionId(jd_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_shortlist_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
    Path(jd_id): Path<String>,
    request: Option<axum::Json<CloseShortlistRequest>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    // A compliant close carries no reason, so the body is optional.
    let request = request
        .map(|axum::Json(request)| request)
        .unwrap_or_default();
    match service.close_shortlist(&JobDescriptionId(jd_id), request) {
        Ok(closed) => (StatusCode::OK, axum::Json(closed)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn opportunities_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.opportunities() {
        Ok(items) => (StatusCode::OK, axum::Json(Collection::from(items))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn feedback_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.feedback() {
        Ok(items) => (StatusCode::OK, axum::Json(Collection::from(items))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn audit_log_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.audit_log() {
        Ok(entries) => (StatusCode::OK, axum::Json(Collection::from(entries))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pipeline_stats_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.pipeline_stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.export() {
        Ok(snapshot) => {
            let disposition = format!("attachment; filename=\"{}\"", snapshot.file_name());
            (
                StatusCode::OK,
                [(header::CONTENT_DISPOSITION, disposition)],
                axum::Json(snapshot),
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R, A>(
    State(service): State<Arc<RecruitingService<R, A>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    match service.reset() {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "status": "reset" }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn status_for(error: &RecruitingServiceError) -> StatusCode {
    match error {
        RecruitingServiceError::Compliance(
            ComplianceViolation::AlreadyClosed | ComplianceViolation::NotEvaluated,
        ) => StatusCode::CONFLICT,
        RecruitingServiceError::Compliance(_)
        | RecruitingServiceError::Rejected(_)
        | RecruitingServiceError::InvalidCandidate(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecruitingServiceError::CandidateNotFound(_)
        | RecruitingServiceError::JobDescriptionNotFound(_)
        | RecruitingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RecruitingServiceError::Repository(RepositoryError::Unavailable(_))
        | RecruitingServiceError::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(error: RecruitingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}
