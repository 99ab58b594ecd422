use super::domain::{
    Candidate, CandidateId, Feedback, JobDescription, JobDescriptionId, Opportunity,
};
use super::seed::RecruitingSeed;

/// Entity store abstraction so the service can be exercised in isolation.
///
/// Implementations serialise writes; reads return owned snapshots.
pub trait RecruitingRepository: Send + Sync {
    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError>;
    fn candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError>;

    /// Job descriptions, most recently created first.
    fn job_descriptions(&self) -> Result<Vec<JobDescription>, RepositoryError>;
    fn job_description(
        &self,
        id: &JobDescriptionId,
    ) -> Result<Option<JobDescription>, RepositoryError>;
    fn insert_job_description(
        &self,
        job: JobDescription,
    ) -> Result<JobDescription, RepositoryError>;

    fn opportunities(&self) -> Result<Vec<Opportunity>, RepositoryError>;
    fn feedback(&self) -> Result<Vec<Feedback>, RepositoryError>;

    /// Drop all state and reload the seed collections.
    fn restore(&self, seed: &RecruitingSeed) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
