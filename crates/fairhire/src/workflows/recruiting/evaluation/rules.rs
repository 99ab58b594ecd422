use super::super::domain::{Requirement, RequirementKind};

/// Matched/total tally for one requirement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Coverage {
    pub matched: usize,
    pub total: usize,
}

impl Coverage {
    /// Share of matched requirements on a 0-100 scale; an empty kind counts as 0.
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            self.matched as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// A requirement is met when any skill name contains its text (both lowercased).
pub(crate) fn requirement_met(skill_names: &[String], requirement: &Requirement) -> bool {
    let needle = requirement.text.to_lowercase();
    skill_names.iter().any(|skill| skill.contains(needle.as_str()))
}

pub(crate) fn coverage(
    skill_names: &[String],
    requirements: &[Requirement],
    kind: RequirementKind,
) -> Coverage {
    requirements
        .iter()
        .filter(|requirement| requirement.kind == kind)
        .fold(Coverage::default(), |mut acc, requirement| {
            acc.total += 1;
            if requirement_met(skill_names, requirement) {
                acc.matched += 1;
            }
            acc
        })
}
