use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::audit::{AuditAction, AuditError, AuditEvent, AuditLogEntry, AuditSink};
use super::compliance::{
    ComplianceGuard, CompliancePolicy, ComplianceViolation, ShortlistClosure,
    ShortlistEvaluation, ShortlistState,
};
use super::domain::{
    Candidate, CandidateDraft, CandidateId, Feedback, JobDescription, JobDescriptionDraft,
    JobDescriptionId, JobDescriptionRejected, OptInTag, Opportunity, Skill, SkillLevel,
};
use super::evaluation::{build_shortlist, evaluate_candidate, CandidateMatch, ShortlistEntry};
use super::export::ExportSnapshot;
use super::inclusivity::{review_draft, InclusivityReport};
use super::pipeline::PipelineStats;
use super::repository::{RecruitingRepository, RepositoryError};
use super::seed::RecruitingSeed;

/// Actor recorded on audit entries when the caller does not identify one.
pub const SYSTEM_ACTOR: &str = "system";

/// Ranked shortlist plus the guardrail verdict, as shown before closing.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistView {
    pub job_description_id: JobDescriptionId,
    pub entries: Vec<ShortlistEntry>,
    pub dei_compliant: bool,
    pub top_n: usize,
    pub dei_mode: bool,
}

/// Request to close the current shortlist of a job description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseShortlistRequest {
    #[serde(default)]
    pub override_reason: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistClosed {
    pub closure: ShortlistClosure,
    pub audit_entry: AuditLogEntry,
}

/// Service composing the entity store, match evaluator, compliance guard, and audit log.
pub struct RecruitingService<R, A> {
    repository: Arc<R>,
    audit: Arc<A>,
    guard: Arc<ComplianceGuard>,
    seed: Arc<RecruitingSeed>,
    job_sequence: AtomicU64,
    candidate_sequence: AtomicU64,
}

impl<R, A> RecruitingService<R, A>
where
    R: RecruitingRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<A>, policy: CompliancePolicy) -> Self {
        Self::with_seed(repository, audit, policy, RecruitingSeed::standard())
    }

    /// Identifiers for new entities continue after the seed's own.
    pub fn with_seed(
        repository: Arc<R>,
        audit: Arc<A>,
        policy: CompliancePolicy,
        seed: RecruitingSeed,
    ) -> Self {
        let job_sequence = AtomicU64::new(seed.job_descriptions.len() as u64 + 1);
        let candidate_sequence = AtomicU64::new(seed.candidates.len() as u64 + 1);

        Self {
            repository,
            audit,
            guard: Arc::new(ComplianceGuard::with_policy(policy)),
            seed: Arc::new(seed),
            job_sequence,
            candidate_sequence,
        }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        self.guard.policy()
    }

    pub fn candidates(&self) -> Result<Vec<Candidate>, RecruitingServiceError> {
        Ok(self.repository.candidates()?)
    }

    pub fn candidate(&self, id: &CandidateId) -> Result<Candidate, RecruitingServiceError> {
        self.repository
            .candidate(id)?
            .ok_or_else(|| RecruitingServiceError::CandidateNotFound(id.clone()))
    }

    pub fn register_candidate(
        &self,
        draft: CandidateDraft,
        user: Option<&str>,
    ) -> Result<Candidate, RecruitingServiceError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(RecruitingServiceError::InvalidCandidate(
                "candidate name is required".to_string(),
            ));
        }

        let sequence = self.candidate_sequence.fetch_add(1, Ordering::Relaxed);
        let candidate = Candidate {
            id: CandidateId(format!("c-{sequence}")),
            name,
            location: draft.location,
            summary: draft.summary,
            skills: draft.skills,
            experiences: Vec::new(),
            projects: Vec::new(),
            posts: Vec::new(),
            opt_in_tags: draft.opt_in_tags,
            connections: 0,
        };

        let stored = self.repository.insert_candidate(candidate)?;
        self.audit.record(AuditEvent {
            action: AuditAction::CandidateAdded,
            user: actor(user),
            details: format!("Candidate added: {}", stored.name),
            dei_compliant: None,
            override_reason: None,
        })?;

        info!(candidate_id = %stored.id.0, "candidate registered");
        Ok(stored)
    }

    /// Apply `edit` to a stored candidate and persist the result.
    pub fn amend_candidate<F>(
        &self,
        id: &CandidateId,
        edit: F,
    ) -> Result<Candidate, RecruitingServiceError>
    where
        F: FnOnce(&mut Candidate),
    {
        let mut candidate = self.candidate(id)?;
        edit(&mut candidate);
        candidate.id = id.clone();
        self.repository.update_candidate(candidate.clone())?;
        Ok(candidate)
    }

    pub fn add_skill(
        &self,
        id: &CandidateId,
        name: &str,
        level: Option<SkillLevel>,
    ) -> Result<Candidate, RecruitingServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecruitingServiceError::InvalidCandidate(
                "skill name is required".to_string(),
            ));
        }

        self.amend_candidate(id, |candidate| {
            candidate.skills.push(Skill {
                name: name.to_string(),
                level: Some(level.unwrap_or(SkillLevel::Intermediate)),
            });
        })
    }

    pub fn add_opt_in_tag(
        &self,
        id: &CandidateId,
        tag: OptInTag,
    ) -> Result<Candidate, RecruitingServiceError> {
        let label = tag.label.trim().to_string();
        if label.is_empty() {
            return Err(RecruitingServiceError::InvalidCandidate(
                "tag label is required".to_string(),
            ));
        }

        self.amend_candidate(id, |candidate| {
            candidate.opt_in_tags.push(OptInTag {
                label,
                category: tag.category,
            });
        })
    }

    pub fn job_descriptions(&self) -> Result<Vec<JobDescription>, RecruitingServiceError> {
        Ok(self.repository.job_descriptions()?)
    }

    pub fn job_description(
        &self,
        id: &JobDescriptionId,
    ) -> Result<JobDescription, RecruitingServiceError> {
        self.repository
            .job_description(id)?
            .ok_or_else(|| RecruitingServiceError::JobDescriptionNotFound(id.clone()))
    }

    pub fn create_job_description(
        &self,
        draft: JobDescriptionDraft,
        user: Option<&str>,
    ) -> Result<JobDescription, RecruitingServiceError> {
        let draft = draft.validated()?;
        let sequence = self.job_sequence.fetch_add(1, Ordering::Relaxed);

        let job = JobDescription {
            id: JobDescriptionId(format!("jd-{sequence}")),
            title: draft.title,
            company: draft.company,
            description: draft.description,
            requirements: draft.requirements,
            salary: draft.salary.filter(|salary| !salary.trim().is_empty()),
            location: draft.location,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_job_description(job)?;
        self.audit.record(AuditEvent {
            action: AuditAction::JdCreated,
            user: actor(user),
            details: format!("Created JD: {}", stored.title),
            dei_compliant: Some(true),
            override_reason: None,
        })?;

        info!(
            job_description_id = %stored.id.0,
            requirements = stored.requirements.len(),
            "job description created"
        );
        Ok(stored)
    }

    pub fn review_inclusivity(&self, draft: &JobDescriptionDraft) -> InclusivityReport {
        review_draft(draft)
    }

    pub fn evaluate_match(
        &self,
        candidate_id: &CandidateId,
        job_id: &JobDescriptionId,
    ) -> Result<CandidateMatch, RecruitingServiceError> {
        let candidate = self.candidate(candidate_id)?;
        let job = self.job_description(job_id)?;
        Ok(evaluate_candidate(&candidate, &job))
    }

    /// Rank the current roster against a job description, recomputed on every call.
    pub fn shortlist(
        &self,
        job_id: &JobDescriptionId,
    ) -> Result<ShortlistView, RecruitingServiceError> {
        let job = self.job_description(job_id)?;
        let candidates = self.repository.candidates()?;
        let entries = build_shortlist(&candidates, &job);
        let dei_compliant = self.guard.is_compliant(&entries);
        let policy = self.guard.policy();

        Ok(ShortlistView {
            job_description_id: job.id,
            entries,
            dei_compliant,
            top_n: policy.top_n(),
            dei_mode: policy.dei_mode(),
        })
    }

    /// Evaluate a fresh shortlist and close it, recording the outcome in the audit log.
    ///
    /// Nothing is recorded when the close is rejected.
    pub fn close_shortlist(
        &self,
        job_id: &JobDescriptionId,
        request: CloseShortlistRequest,
    ) -> Result<ShortlistClosed, RecruitingServiceError> {
        let job = self.job_description(job_id)?;
        let candidates = self.repository.candidates()?;

        let mut evaluation =
            ShortlistEvaluation::open(job.id.clone(), build_shortlist(&candidates, &job));
        let state = evaluation.evaluate(&self.guard)?;

        let closure = match evaluation.close(request.override_reason.as_deref()) {
            Ok(closure) => closure,
            Err(violation) => {
                warn!(
                    job_description_id = %job.id.0,
                    ?state,
                    %violation,
                    "shortlist close rejected"
                );
                return Err(violation.into());
            }
        };

        let user = actor(request.user.as_deref());
        let audit_entry = self.audit.record(closure.audit_event(&user, &job.title))?;

        if state == ShortlistState::NonCompliant {
            warn!(
                job_description_id = %job.id.0,
                audit_id = %audit_entry.id,
                "DEI guardrail overridden"
            );
        } else {
            info!(
                job_description_id = %job.id.0,
                audit_id = %audit_entry.id,
                "shortlist closed"
            );
        }

        Ok(ShortlistClosed {
            closure,
            audit_entry,
        })
    }

    pub fn opportunities(&self) -> Result<Vec<Opportunity>, RecruitingServiceError> {
        Ok(self.repository.opportunities()?)
    }

    pub fn feedback(&self) -> Result<Vec<Feedback>, RecruitingServiceError> {
        Ok(self.repository.feedback()?)
    }

    /// Audit entries, newest first.
    pub fn audit_log(&self) -> Result<Vec<AuditLogEntry>, RecruitingServiceError> {
        let mut entries = self.audit.entries()?;
        entries.reverse();
        Ok(entries)
    }

    pub fn pipeline_stats(&self) -> Result<PipelineStats, RecruitingServiceError> {
        let candidates = self.repository.candidates()?;
        let jobs = self.repository.job_descriptions()?;
        let audit = self.audit.entries()?;
        Ok(PipelineStats::collect(&candidates, &jobs, &audit))
    }

    pub fn export(&self) -> Result<ExportSnapshot, RecruitingServiceError> {
        Ok(ExportSnapshot {
            candidates: self.repository.candidates()?,
            job_descriptions: self.repository.job_descriptions()?,
            opportunities: self.repository.opportunities()?,
            feedback: self.repository.feedback()?,
            audit_log: self.audit_log()?,
            export_date: Utc::now(),
        })
    }

    /// Restore every collection, the audit log included, to the seed data.
    pub fn reset(&self) -> Result<(), RecruitingServiceError> {
        self.repository.restore(&self.seed)?;
        self.audit.restore(self.seed.audit_log.clone())?;
        self.job_sequence
            .store(self.seed.job_descriptions.len() as u64 + 1, Ordering::Relaxed);
        self.candidate_sequence
            .store(self.seed.candidates.len() as u64 + 1, Ordering::Relaxed);
        info!("recruiting data reset to seed");
        Ok(())
    }
}

fn actor(user: Option<&str>) -> String {
    user.map(str::trim)
        .filter(|user| !user.is_empty())
        .unwrap_or(SYSTEM_ACTOR)
        .to_string()
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Compliance(#[from] ComplianceViolation),
    #[error(transparent)]
    Rejected(#[from] JobDescriptionRejected),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
    #[error("job description {0} not found")]
    JobDescriptionNotFound(JobDescriptionId),
    #[error("invalid candidate update: {0}")]
    InvalidCandidate(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
