//! Candidate matching, shortlisting, and the DEI guardrail that governs closing a shortlist.
//!
//! Scores come only from skill names and requirement texts. Opt-in tags are read by the
//! compliance guard and pipeline statistics and never by the evaluator.

pub mod audit;
pub mod compliance;
pub mod domain;
pub mod evaluation;
pub mod export;
pub mod inclusivity;
pub mod memory;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{AuditAction, AuditError, AuditEvent, AuditLog, AuditLogEntry, AuditSink};
pub use compliance::{
    check_compliance, ClosePath, ComplianceGuard, CompliancePolicy, ComplianceViolation,
    ShortlistClosure, ShortlistEvaluation, ShortlistState, DEFAULT_TOP_N,
};
pub use domain::{
    Candidate, CandidateDraft, CandidateId, Experience, Feedback, FeedbackTone, JobDescription,
    JobDescriptionDraft, JobDescriptionId, JobDescriptionRejected, OptInTag, Opportunity,
    OpportunityKind, Post, Project, Requirement, RequirementKind, Skill, SkillLevel, TagCategory,
};
pub use evaluation::{build_shortlist, evaluate, evaluate_candidate, CandidateMatch, ShortlistEntry};
pub use export::ExportSnapshot;
pub use inclusivity::{review_draft, InclusivityIssue, InclusivityReport, IssueSeverity};
pub use memory::{InMemoryAuditLog, InMemoryRecruitingRepository};
pub use pipeline::{BiasMonitorStatus, PipelineStats};
pub use repository::{RecruitingRepository, RepositoryError};
pub use router::recruiting_router;
pub use seed::RecruitingSeed;
pub use service::{
    CloseShortlistRequest, RecruitingService, RecruitingServiceError, ShortlistClosed,
    ShortlistView,
};
