use serde::Serialize;

use super::domain::{JobDescriptionDraft, RequirementKind};

/// Must-have count above which a draft is flagged as over-specified.
pub const MAX_MUST_HAVES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    High,
    Medium,
    Low,
}

struct TermRule {
    term: &'static str,
    severity: IssueSeverity,
    suggestion: &'static str,
}

const NON_INCLUSIVE_TERMS: &[TermRule] = &[
    TermRule {
        term: "rockstar",
        severity: IssueSeverity::High,
        suggestion: "expert",
    },
    TermRule {
        term: "ninja",
        severity: IssueSeverity::High,
        suggestion: "specialist",
    },
    TermRule {
        term: "guru",
        severity: IssueSeverity::Medium,
        suggestion: "expert",
    },
    TermRule {
        term: "aggressive",
        severity: IssueSeverity::High,
        suggestion: "proactive",
    },
    TermRule {
        term: "young",
        severity: IssueSeverity::High,
        suggestion: "motivated",
    },
    TermRule {
        term: "digital native",
        severity: IssueSeverity::Medium,
        suggestion: "digital skills",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusivityIssue {
    pub term: &'static str,
    pub severity: IssueSeverity,
    pub suggestion: &'static str,
    /// Byte offset of the first occurrence within the scanned text.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InclusivityReport {
    pub issues: Vec<InclusivityIssue>,
    pub must_have_count: usize,
    pub too_many_must_haves: bool,
}

impl InclusivityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && !self.too_many_must_haves
    }
}

/// Scan title, description and requirement texts for non-inclusive wording. Advisory only.
pub fn review_draft(draft: &JobDescriptionDraft) -> InclusivityReport {
    let requirement_text = draft
        .requirements
        .iter()
        .map(|requirement| requirement.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let text = format!("{} {} {}", draft.title, draft.description, requirement_text).to_lowercase();

    let issues = NON_INCLUSIVE_TERMS
        .iter()
        .filter_map(|rule| {
            text.find(rule.term).map(|position| InclusivityIssue {
                term: rule.term,
                severity: rule.severity,
                suggestion: rule.suggestion,
                position,
            })
        })
        .collect();

    let must_have_count = draft
        .requirements
        .iter()
        .filter(|requirement| requirement.kind == RequirementKind::Must)
        .count();

    InclusivityReport {
        issues,
        must_have_count,
        too_many_must_haves: must_have_count > MAX_MUST_HAVES,
    }
}
