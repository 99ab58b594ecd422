use serde::{Deserialize, Serialize};

use crate::workflows::recruiting::domain::{Candidate, Experience, Project, Skill, SkillLevel};

/// Structured CV returned by the external parsing service.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<ParsedSkill>,
    #[serde(default)]
    pub experiences: Vec<ParsedExperience>,
    #[serde(default)]
    pub projects: Vec<ParsedProject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSkill {
    pub name: String,
    #[serde(default)]
    pub proficiency: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExperience {
    #[serde(default, alias = "job_title")]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProject {
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// What [`ParsedDocument::apply_to`] changed on a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppliedChanges {
    pub skills_added: usize,
    pub summary_replaced: bool,
    pub experiences_replaced: bool,
    pub projects_added: usize,
}

impl ParsedDocument {
    /// Merge the document into `candidate`.
    ///
    /// Skills and projects are appended. Summary and experiences are replaced
    /// only when the document carries them. Opt-in tags are never touched.
    pub fn apply_to(&self, candidate: &mut Candidate) -> AppliedChanges {
        let mut changes = AppliedChanges::default();

        for skill in &self.skills {
            let name = skill.name.trim();
            if name.is_empty() {
                continue;
            }
            let level = skill
                .proficiency
                .as_deref()
                .and_then(SkillLevel::from_label)
                .unwrap_or(SkillLevel::Intermediate);
            candidate.skills.push(Skill::new(name, level));
            changes.skills_added += 1;
        }

        if let Some(summary) = self
            .summary
            .as_deref()
            .map(str::trim)
            .filter(|summary| !summary.is_empty())
        {
            candidate.summary = summary.to_string();
            changes.summary_replaced = true;
        }

        if !self.experiences.is_empty() {
            candidate.experiences = self
                .experiences
                .iter()
                .map(|experience| Experience {
                    title: experience.title.clone(),
                    company: experience.company.clone(),
                    period: experience.period.clone().unwrap_or_default(),
                    description: experience.description.clone().unwrap_or_default(),
                })
                .collect();
            changes.experiences_replaced = true;
        }

        for project in &self.projects {
            candidate.projects.push(Project {
                title: project.title.clone(),
                description: project.description.clone().unwrap_or_default(),
                technologies: project.technologies.clone(),
                link: project.link.clone(),
            });
            changes.projects_added += 1;
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruiting::seed::RecruitingSeed;

    #[test]
    fn apply_appends_skills_with_recognised_levels() {
        let mut candidate = RecruitingSeed::standard().candidates[1].clone();
        let before = candidate.skills.len();
        let document: ParsedDocument = serde_json::from_value(serde_json::json!({
            "skills": [
                { "name": "Microservices", "proficiency": "senior" },
                { "name": "gRPC", "proficiency": "unknown" },
                { "name": "  " }
            ]
        }))
        .expect("document decodes");

        let changes = document.apply_to(&mut candidate);

        assert_eq!(changes.skills_added, 2);
        assert_eq!(candidate.skills.len(), before + 2);
        assert_eq!(candidate.skills[before].level, Some(SkillLevel::Advanced));
        assert_eq!(candidate.skills[before + 1].level, Some(SkillLevel::Intermediate));
        assert!(!changes.summary_replaced);
        assert!(!changes.experiences_replaced);
    }

    #[test]
    fn apply_replaces_summary_and_experiences_only_when_present() {
        let mut candidate = RecruitingSeed::standard().candidates[0].clone();
        let tags = candidate.opt_in_tags.clone();
        let document = ParsedDocument {
            summary: Some("Frontend lead".to_string()),
            experiences: vec![ParsedExperience {
                title: "Lead".to_string(),
                company: "Acme".to_string(),
                period: None,
                description: None,
            }],
            projects: vec![ParsedProject {
                title: "Design tokens".to_string(),
                ..ParsedProject::default()
            }],
            ..ParsedDocument::default()
        };

        let changes = document.apply_to(&mut candidate);

        assert!(changes.summary_replaced);
        assert_eq!(candidate.summary, "Frontend lead");
        assert_eq!(candidate.experiences.len(), 1);
        assert_eq!(candidate.projects.last().map(|p| p.title.as_str()), Some("Design tokens"));
        assert_eq!(candidate.opt_in_tags, tags);
    }
}
