use serde::Serialize;

use super::audit::{AuditAction, AuditEvent};
use super::domain::JobDescriptionId;
use super::evaluation::ShortlistEntry;
use crate::config::ShortlistConfig;

/// Number of leading shortlist entries inspected when none is configured.
pub const DEFAULT_TOP_N: usize = 5;

/// Errors raised while closing a shortlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplianceViolation {
    #[error("shortlist is not DEI compliant; an override reason is required to close it")]
    MissingOverrideReason,
    #[error("shortlist has already been closed")]
    AlreadyClosed,
    #[error("shortlist must be evaluated before it can be closed")]
    NotEvaluated,
    #[error("top-N window must be at least 1")]
    InvalidTopN,
}

/// True when any of the first `top_n` entries carries at least one opt-in tag.
///
/// Shorter shortlists are inspected as they are; an empty one is never compliant.
pub fn check_compliance(shortlist: &[ShortlistEntry], top_n: usize) -> bool {
    shortlist
        .iter()
        .take(top_n)
        .any(|entry| entry.candidate.has_opt_in())
}

/// Policy dial backing the DEI guardrail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompliancePolicy {
    top_n: usize,
    dei_mode: bool,
}

impl CompliancePolicy {
    pub fn new(top_n: usize, dei_mode: bool) -> Result<Self, ComplianceViolation> {
        if top_n == 0 {
            return Err(ComplianceViolation::InvalidTopN);
        }
        Ok(Self { top_n, dei_mode })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// With DEI mode off every shortlist evaluates as compliant.
    pub fn dei_mode(&self) -> bool {
        self.dei_mode
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            dei_mode: true,
        }
    }
}

impl TryFrom<&ShortlistConfig> for CompliancePolicy {
    type Error = ComplianceViolation;

    fn try_from(config: &ShortlistConfig) -> Result<Self, Self::Error> {
        Self::new(config.top_n, config.dei_mode)
    }
}

/// Advisory guard: it reads a ranked shortlist and never reorders or rescores it.
#[derive(Debug, Clone, Default)]
pub struct ComplianceGuard {
    policy: CompliancePolicy,
}

impl ComplianceGuard {
    pub fn with_policy(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    pub fn is_compliant(&self, shortlist: &[ShortlistEntry]) -> bool {
        !self.policy.dei_mode || check_compliance(shortlist, self.policy.top_n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortlistState {
    Open,
    Compliant,
    NonCompliant,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosePath {
    Standard,
    Override,
}

/// Outcome of a successful close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortlistClosure {
    pub job_description_id: JobDescriptionId,
    pub path: ClosePath,
    pub dei_compliant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
}

impl ShortlistClosure {
    /// Audit event recording this closure on behalf of `user`.
    pub fn audit_event(&self, user: &str, job_title: &str) -> AuditEvent {
        let (action, details) = match self.path {
            ClosePath::Standard => (
                AuditAction::ShortlistClosed,
                format!("Shortlist closed for JD: {job_title}"),
            ),
            ClosePath::Override => (
                AuditAction::OverrideTriggered,
                format!("DEI guardrail override for JD: {job_title}"),
            ),
        };

        AuditEvent {
            action,
            user: user.to_string(),
            details,
            dei_compliant: Some(self.dei_compliant),
            override_reason: self.override_reason.clone(),
        }
    }
}

/// One evaluation of a job description's shortlist, from `Open` to `Closed`.
///
/// A new job description selection or roster change starts a new instance;
/// `Closed` is terminal.
#[derive(Debug, Clone)]
pub struct ShortlistEvaluation {
    job_description_id: JobDescriptionId,
    entries: Vec<ShortlistEntry>,
    state: ShortlistState,
}

impl ShortlistEvaluation {
    pub fn open(job_description_id: JobDescriptionId, entries: Vec<ShortlistEntry>) -> Self {
        Self {
            job_description_id,
            entries,
            state: ShortlistState::Open,
        }
    }

    pub fn state(&self) -> ShortlistState {
        self.state
    }

    pub fn entries(&self) -> &[ShortlistEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ShortlistEntry> {
        self.entries
    }

    pub fn evaluate(&mut self, guard: &ComplianceGuard) -> Result<ShortlistState, ComplianceViolation> {
        if self.state == ShortlistState::Closed {
            return Err(ComplianceViolation::AlreadyClosed);
        }

        self.state = if guard.is_compliant(&self.entries) {
            ShortlistState::Compliant
        } else {
            ShortlistState::NonCompliant
        };
        Ok(self.state)
    }

    /// Close the shortlist. A non-compliant shortlist needs a non-blank
    /// `override_reason`; on a compliant one the reason is ignored.
    pub fn close(
        &mut self,
        override_reason: Option<&str>,
    ) -> Result<ShortlistClosure, ComplianceViolation> {
        let closure = match self.state {
            ShortlistState::Open => return Err(ComplianceViolation::NotEvaluated),
            ShortlistState::Closed => return Err(ComplianceViolation::AlreadyClosed),
            ShortlistState::Compliant => ShortlistClosure {
                job_description_id: self.job_description_id.clone(),
                path: ClosePath::Standard,
                dei_compliant: true,
                override_reason: None,
            },
            ShortlistState::NonCompliant => {
                let reason = override_reason
                    .map(str::trim)
                    .filter(|reason| !reason.is_empty())
                    .ok_or(ComplianceViolation::MissingOverrideReason)?;

                ShortlistClosure {
                    job_description_id: self.job_description_id.clone(),
                    path: ClosePath::Override,
                    dei_compliant: false,
                    override_reason: Some(reason.to_string()),
                }
            }
        };

        self.state = ShortlistState::Closed;
        Ok(closure)
    }
}
