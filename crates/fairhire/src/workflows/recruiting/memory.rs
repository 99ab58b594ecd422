use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::audit::{AuditError, AuditEvent, AuditLog, AuditLogEntry, AuditSink};
use super::domain::{
    Candidate, CandidateId, Feedback, JobDescription, JobDescriptionId, Opportunity,
};
use super::repository::{RecruitingRepository, RepositoryError};
use super::seed::RecruitingSeed;

#[derive(Debug, Default)]
struct StoreState {
    candidates: Vec<Candidate>,
    job_descriptions: Vec<JobDescription>,
    opportunities: Vec<Opportunity>,
    feedback: Vec<Feedback>,
}

impl StoreState {
    fn from_seed(seed: &RecruitingSeed) -> Self {
        Self {
            candidates: seed.candidates.clone(),
            job_descriptions: seed.job_descriptions.clone(),
            opportunities: seed.opportunities.clone(),
            feedback: seed.feedback.clone(),
        }
    }
}

/// Process-local entity store. One mutation at a time behind a mutex.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecruitingRepository {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRecruitingRepository {
    pub fn seeded(seed: &RecruitingSeed) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::from_seed(seed))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("entity store lock poisoned".to_string()))
    }
}

impl RecruitingRepository for InMemoryRecruitingRepository {
    fn candidates(&self) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self.lock()?.candidates.clone())
    }

    fn candidate(&self, id: &CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .candidates
            .iter()
            .find(|candidate| &candidate.id == id)
            .cloned())
    }

    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.candidates.iter().any(|existing| existing.id == candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.candidates.push(candidate.clone());
        Ok(candidate)
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard
            .candidates
            .iter_mut()
            .find(|existing| existing.id == candidate.id)
        {
            Some(slot) => {
                *slot = candidate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn job_descriptions(&self) -> Result<Vec<JobDescription>, RepositoryError> {
        Ok(self.lock()?.job_descriptions.clone())
    }

    fn job_description(
        &self,
        id: &JobDescriptionId,
    ) -> Result<Option<JobDescription>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.job_descriptions.iter().find(|job| &job.id == id).cloned())
    }

    fn insert_job_description(
        &self,
        job: JobDescription,
    ) -> Result<JobDescription, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.job_descriptions.iter().any(|existing| existing.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.job_descriptions.insert(0, job.clone());
        Ok(job)
    }

    fn opportunities(&self) -> Result<Vec<Opportunity>, RepositoryError> {
        Ok(self.lock()?.opportunities.clone())
    }

    fn feedback(&self) -> Result<Vec<Feedback>, RepositoryError> {
        Ok(self.lock()?.feedback.clone())
    }

    fn restore(&self, seed: &RecruitingSeed) -> Result<(), RepositoryError> {
        *self.lock()? = StoreState::from_seed(seed);
        Ok(())
    }
}

/// Audit sink backed by an in-process [`AuditLog`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditLog {
    log: Arc<Mutex<AuditLog>>,
}

impl InMemoryAuditLog {
    pub fn seeded(entries: Vec<AuditLogEntry>) -> Self {
        Self {
            log: Arc::new(Mutex::new(AuditLog::from_entries(entries))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, AuditLog>, AuditError> {
        self.log
            .lock()
            .map_err(|_| AuditError::Unavailable("audit log lock poisoned".to_string()))
    }
}

impl AuditSink for InMemoryAuditLog {
    fn record(&self, event: AuditEvent) -> Result<AuditLogEntry, AuditError> {
        Ok(self.lock()?.append(event, Utc::now()))
    }

    fn entries(&self) -> Result<Vec<AuditLogEntry>, AuditError> {
        Ok(self.lock()?.entries().to_vec())
    }

    fn restore(&self, entries: Vec<AuditLogEntry>) -> Result<(), AuditError> {
        *self.lock()? = AuditLog::from_entries(entries);
        Ok(())
    }
}
