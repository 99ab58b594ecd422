use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::document::{AppliedChanges, ParsedDocument};
use super::parser::{CvUpload, DocumentParser, ParserError};
use crate::workflows::recruiting::audit::AuditSink;
use crate::workflows::recruiting::domain::{Candidate, CandidateId};
use crate::workflows::recruiting::repository::RecruitingRepository;
use crate::workflows::recruiting::service::{RecruitingService, RecruitingServiceError};

/// Result of attaching a parsed CV to a candidate profile.
#[derive(Debug, Clone, Serialize)]
pub struct CvIntakeOutcome {
    pub candidate: Candidate,
    pub changes: AppliedChanges,
    pub document: ParsedDocument,
}

/// Validates CV uploads, hands them to the parser and merges the result into the store.
pub struct IntakeService<P, R, A> {
    parser: Arc<P>,
    recruiting: Arc<RecruitingService<R, A>>,
}

impl<P, R, A> IntakeService<P, R, A>
where
    P: DocumentParser + 'static,
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(parser: Arc<P>, recruiting: Arc<RecruitingService<R, A>>) -> Self {
        Self { parser, recruiting }
    }

    pub async fn attach_cv(
        &self,
        candidate_id: &CandidateId,
        mut upload: CvUpload,
    ) -> Result<CvIntakeOutcome, IntakeError> {
        if !is_pdf(&upload.content_type) {
            return Err(IntakeError::UnsupportedContentType(upload.content_type));
        }
        if upload.bytes.is_empty() {
            return Err(IntakeError::EmptyUpload);
        }

        // Fail before the upload when the candidate is unknown.
        self.recruiting.candidate(candidate_id)?;
        upload.user_id.get_or_insert_with(|| candidate_id.0.clone());

        let document = match self.parser.parse(upload).await {
            Ok(document) => document,
            Err(error) => {
                warn!(candidate_id = %candidate_id.0, %error, "CV parsing failed");
                return Err(error.into());
            }
        };

        let mut changes = AppliedChanges::default();
        let candidate = self.recruiting.amend_candidate(candidate_id, |candidate| {
            changes = document.apply_to(candidate);
        })?;

        info!(
            candidate_id = %candidate_id.0,
            skills_added = changes.skills_added,
            projects_added = changes.projects_added,
            "CV attached to candidate"
        );

        Ok(CvIntakeOutcome {
            candidate,
            changes,
            document,
        })
    }
}

fn is_pdf(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|parsed| parsed.essence_str() == mime::APPLICATION_PDF.essence_str())
        .unwrap_or(false)
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("only PDF uploads are accepted, got {0}")]
    UnsupportedContentType(String),
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("multipart field `file` is required")]
    MissingFile,
    #[error("malformed multipart payload: {0}")]
    Multipart(String),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Recruiting(#[from] RecruitingServiceError),
}
