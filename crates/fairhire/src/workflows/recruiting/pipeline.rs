use serde::Serialize;

use super::audit::{AuditAction, AuditLogEntry};
use super::domain::{Candidate, JobDescription};

/// Opt-in share at or above which the pool is reported as representative.
pub const OPT_IN_TARGET_PCT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasMonitorStatus {
    Compliant,
    Attention,
}

impl BiasMonitorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Attention => "Attention",
        }
    }
}

/// Roster-level reporting figures. Purely statistical: opt-in tags never feed scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStats {
    pub total_candidates: usize,
    pub candidates_with_opt_in: usize,
    pub opt_in_pct: f32,
    pub bias_monitor: BiasMonitorStatus,
    pub job_descriptions: usize,
    pub audit_entries: usize,
    pub overrides: usize,
}

impl PipelineStats {
    pub fn collect(
        candidates: &[Candidate],
        job_descriptions: &[JobDescription],
        audit_log: &[AuditLogEntry],
    ) -> Self {
        let total_candidates = candidates.len();
        let candidates_with_opt_in = candidates
            .iter()
            .filter(|candidate| candidate.has_opt_in())
            .count();
        let opt_in_pct = if total_candidates > 0 {
            candidates_with_opt_in as f32 * 100.0 / total_candidates as f32
        } else {
            0.0
        };

        let bias_monitor = if opt_in_pct >= OPT_IN_TARGET_PCT {
            BiasMonitorStatus::Compliant
        } else {
            BiasMonitorStatus::Attention
        };

        Self {
            total_candidates,
            candidates_with_opt_in,
            opt_in_pct,
            bias_monitor,
            job_descriptions: job_descriptions.len(),
            audit_entries: audit_log.len(),
            overrides: audit_log
                .iter()
                .filter(|entry| entry.action == AuditAction::OverrideTriggered)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruiting::seed::RecruitingSeed;

    #[test]
    fn empty_roster_reports_zero_share() {
        let stats = PipelineStats::collect(&[], &[], &[]);
        assert_eq!(stats.opt_in_pct, 0.0);
        assert_eq!(stats.bias_monitor, BiasMonitorStatus::Attention);
    }

    #[test]
    fn share_below_target_needs_attention() {
        let seed = RecruitingSeed::standard();
        let mut candidates = seed.candidates.clone();
        for candidate in candidates.iter_mut().skip(1) {
            candidate.opt_in_tags.clear();
        }
        candidates.extend(seed.candidates.iter().cloned().map(|mut candidate| {
            candidate.opt_in_tags.clear();
            candidate
        }));

        let stats = PipelineStats::collect(&candidates, &seed.job_descriptions, &seed.audit_log);
        assert_eq!(stats.total_candidates, 10);
        assert_eq!(stats.candidates_with_opt_in, 1);
        assert_eq!(stats.bias_monitor, BiasMonitorStatus::Attention);
        assert_eq!(stats.bias_monitor.label(), "Attention");
        assert_eq!(stats.overrides, 1);
    }

    #[test]
    fn share_at_target_is_compliant() {
        let seed = RecruitingSeed::standard();
        let mut candidates = seed.candidates.clone();
        for candidate in candidates.iter_mut().skip(1) {
            candidate.opt_in_tags.clear();
        }

        let stats = PipelineStats::collect(&candidates, &[], &[]);
        assert!((stats.opt_in_pct - 20.0).abs() < f32::EPSILON);
        assert_eq!(stats.bias_monitor, BiasMonitorStatus::Compliant);
    }
}
