mod rules;
mod shortlist;

pub use shortlist::{build_shortlist, ShortlistEntry};

use super::domain::{Candidate, CandidateId, JobDescription, Requirement, RequirementKind};
use serde::{Deserialize, Serialize};

/// Weight of the must-have percentage in the overall score.
pub const MUST_HAVE_WEIGHT: f64 = 0.7;
/// Weight of the nice-to-have percentage in the overall score.
pub const NICE_TO_HAVE_WEIGHT: f64 = 0.3;

/// Derived compatibility between one candidate and one requirement set.
///
/// Always recomputable from the candidate's skill names and the requirements,
/// so it is never stored as authoritative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub candidate_id: CandidateId,
    pub score: u8,
    pub must_have_match: u8,
    pub nice_to_have_match: u8,
    pub must_matched: usize,
    pub must_total: usize,
    pub nice_matched: usize,
    pub nice_total: usize,
    pub explanation: String,
}

/// Score `candidate_skills` against `requirements`.
///
/// A job description without must-haves caps the score at 30, since the
/// missing must-have share still carries its 70% weight as zero.
pub fn evaluate(
    candidate_id: &CandidateId,
    candidate_skills: &[String],
    requirements: &[Requirement],
) -> CandidateMatch {
    let skill_names: Vec<String> = candidate_skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();

    let must = rules::coverage(&skill_names, requirements, RequirementKind::Must);
    let nice = rules::coverage(&skill_names, requirements, RequirementKind::Nice);

    let must_pct = must.percentage();
    let nice_pct = nice.percentage();
    let score = to_percent(must_pct * MUST_HAVE_WEIGHT + nice_pct * NICE_TO_HAVE_WEIGHT);

    CandidateMatch {
        candidate_id: candidate_id.clone(),
        score,
        must_have_match: to_percent(must_pct),
        nice_to_have_match: to_percent(nice_pct),
        must_matched: must.matched,
        must_total: must.total,
        nice_matched: nice.matched,
        nice_total: nice.total,
        explanation: format!(
            "Match {score}%: {}/{} must-have, {}/{} nice-to-have",
            must.matched, must.total, nice.matched, nice.total
        ),
    }
}

pub fn evaluate_candidate(candidate: &Candidate, job: &JobDescription) -> CandidateMatch {
    evaluate(&candidate.id, &candidate.skill_names(), &job.requirements)
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
