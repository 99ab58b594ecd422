use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::recruiting::domain::{
    Candidate, CandidateId, Feedback, JobDescription, JobDescriptionId, OptInTag, Opportunity,
    Requirement, Skill, SkillLevel, TagCategory,
};
use crate::workflows::recruiting::evaluation::{build_shortlist, ShortlistEntry};
use crate::workflows::recruiting::repository::{RecruitingRepository, RepositoryError};
use crate::workflows::recruiting::seed::RecruitingSeed;
use crate::workflows::recruiting::{
    recruiting_router, CompliancePolicy, InMemoryAuditLog, InMemoryRecruitingRepository,
    RecruitingService,
};

pub(super) type MemoryService = RecruitingService<InMemoryRecruitingRepository, InMemoryAuditLog>;

pub(super) fn candidate(id: &str, skills: &[&str], tags: &[&str]) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        name: format!("Candidate {id}"),
        location: "Remote".to_string(),
        summary: String::new(),
        skills: skills
            .iter()
            .map(|name| Skill::new(*name, SkillLevel::Advanced))
            .collect(),
        experiences: Vec::new(),
        projects: Vec::new(),
        posts: Vec::new(),
        opt_in_tags: tags
            .iter()
            .map(|label| OptInTag {
                label: label.to_string(),
                category: TagCategory::Diversity,
            })
            .collect(),
        connections: 0,
    }
}

pub(super) fn job(id: &str, must: &[&str], nice: &[&str]) -> JobDescription {
    let requirements = must
        .iter()
        .map(|text| Requirement::must(*text))
        .chain(nice.iter().map(|text| Requirement::nice(*text)))
        .collect();

    JobDescription {
        id: JobDescriptionId(id.to_string()),
        title: format!("Role {id}"),
        company: "Acme".to_string(),
        description: String::new(),
        requirements,
        salary: None,
        location: "Remote".to_string(),
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 10, 9, 0, 0)
            .single()
            .expect("valid instant"),
    }
}

/// Roster where only the lowest-scoring candidate carries an opt-in tag.
pub(super) fn tagged_last_roster() -> Vec<Candidate> {
    vec![
        candidate("c-a", &["Rust", "Kafka"], &[]),
        candidate("c-b", &["Rust"], &[]),
        candidate("c-c", &["Go"], &["Veteran"]),
    ]
}

pub(super) fn rust_job() -> JobDescription {
    job("jd-rust", &["Rust"], &["Kafka"])
}

pub(super) fn shortlist_for(candidates: &[Candidate], job: &JobDescription) -> Vec<ShortlistEntry> {
    build_shortlist(candidates, job)
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryRecruitingRepository>,
    Arc<InMemoryAuditLog>,
) {
    build_service_with_policy(CompliancePolicy::default())
}

pub(super) fn build_service_with_policy(
    policy: CompliancePolicy,
) -> (
    MemoryService,
    Arc<InMemoryRecruitingRepository>,
    Arc<InMemoryAuditLog>,
) {
    let seed = RecruitingSeed::standard();
    let repository = Arc::new(InMemoryRecruitingRepository::seeded(&seed));
    let audit = Arc::new(InMemoryAuditLog::seeded(seed.audit_log.clone()));
    let service = RecruitingService::with_seed(repository.clone(), audit.clone(), policy, seed);
    (service, repository, audit)
}

pub(super) fn strict_policy() -> CompliancePolicy {
    CompliancePolicy::new(1, true).expect("top-n of one is valid")
}

pub(super) struct UnavailableRepository;

impl RecruitingRepository for UnavailableRepository {
    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn candidate(&self, _id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert_candidate(&self, _candidate: Candidate) -> Result<Candidate, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update_candidate(&self, _candidate: Candidate) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn job_descriptions(&self) -> Result<Vec<JobDescription>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn job_description(
        &self,
        _id: &JobDescriptionId,
    ) -> Result<Option<JobDescription>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert_job_description(
        &self,
        _job: JobDescription,
    ) -> Result<JobDescription, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn opportunities(&self) -> Result<Vec<Opportunity>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn feedback(&self) -> Result<Vec<Feedback>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn restore(&self, _seed: &RecruitingSeed) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    recruiting_router(Arc::new(service))
}
