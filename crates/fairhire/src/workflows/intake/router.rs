use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::parser::{CvUpload, DocumentParser};
use super::service::{IntakeError, IntakeService};
use crate::workflows::recruiting::audit::AuditSink;
use crate::workflows::recruiting::domain::CandidateId;
use crate::workflows::recruiting::repository::RecruitingRepository;
use crate::workflows::recruiting::router::status_for;

/// Router exposing CV upload for an existing candidate.
pub fn intake_router<P, R, A>(service: Arc<IntakeService<P, R, A>>) -> Router
where
    P: DocumentParser + 'static,
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/:candidate_id/cv",
            post(upload_cv_handler::<P, R, A>),
        )
        .with_state(service)
}

pub(crate) async fn upload_cv_handler<P, R, A>(
    State(service): State<Arc<IntakeService<P, R, A>>>,
    Path(candidate_id): Path<String>,
    multipart: Multipart,
) -> Response
where
    P: DocumentParser + 'static,
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    let result = match read_upload(multipart).await {
        Ok(upload) => service.attach_cv(&CandidateId(candidate_id), upload).await,
        Err(error) => Err(error),
    };

    match result {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => {
            let status = match &error {
                IntakeError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                IntakeError::EmptyUpload | IntakeError::MissingFile | IntakeError::Multipart(_) => {
                    StatusCode::BAD_REQUEST
                }
                IntakeError::Parser(_) => StatusCode::BAD_GATEWAY,
                IntakeError::Recruiting(inner) => status_for(inner),
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}

/// Collect the `file` part plus an optional `user_id` text part.
async fn read_upload(mut multipart: Multipart) -> Result<CvUpload, IntakeError> {
    let mut file = None;
    let mut user_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| IntakeError::Multipart(error.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("cv.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|error| IntakeError::Multipart(error.to_string()))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|error| IntakeError::Multipart(error.to_string()))?;
                user_id = Some(text).filter(|text| !text.trim().is_empty());
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) = file.ok_or(IntakeError::MissingFile)?;
    Ok(CvUpload {
        file_name,
        content_type,
        bytes,
        user_id,
    })
}
