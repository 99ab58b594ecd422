use super::super::domain::{Candidate, JobDescription};
use super::{evaluate_candidate, CandidateMatch};
use serde::Serialize;

/// Candidate paired with its match against the job description being shortlisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistEntry {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(rename = "match")]
    pub evaluation: CandidateMatch,
}

impl ShortlistEntry {
    pub fn score(&self) -> u8 {
        self.evaluation.score
    }
}

/// Rank every candidate against `job`, highest score first.
///
/// Equal scores keep their roster order (`sort_by` is stable). The result is
/// derived fresh on each call and never cached.
pub fn build_shortlist(candidates: &[Candidate], job: &JobDescription) -> Vec<ShortlistEntry> {
    let mut entries: Vec<ShortlistEntry> = candidates
        .iter()
        .map(|candidate| ShortlistEntry {
            evaluation: evaluate_candidate(candidate, job),
            candidate: candidate.clone(),
        })
        .collect();

    entries.sort_by(|left, right| right.score().cmp(&left.score()));
    entries
}
