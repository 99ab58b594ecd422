use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

/// Identifier wrapper for job descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobDescriptionId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JobDescriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Lenient parse used when a level arrives as free text (e.g. from a CV parser).
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" | "basic" | "junior" => Some(Self::Beginner),
            "intermediate" | "medium" => Some(Self::Intermediate),
            "advanced" | "senior" => Some(Self::Advanced),
            "expert" | "native" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// A named skill. Names are free text and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level: Some(level),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Diversity,
    Background,
    Other,
}

/// Voluntary, candidate-supplied label. Never an input to scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptInTag {
    pub label: String,
    pub category: TagCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    pub date: NaiveDate,
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub opt_in_tags: Vec<OptInTag>,
    #[serde(default)]
    pub connections: u32,
}

impl Candidate {
    /// Lowercased skill names; duplicates are harmless since matching tests presence.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .map(|skill| skill.name.to_lowercase())
            .collect()
    }

    pub fn has_opt_in(&self) -> bool {
        !self.opt_in_tags.is_empty()
    }
}

/// Inbound payload for registering a candidate profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub opt_in_tags: Vec<OptInTag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Must,
    Nice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: RequirementKind,
}

impl Requirement {
    pub fn must(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: RequirementKind::Must,
        }
    }

    pub fn nice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: RequirementKind::Nice,
        }
    }
}

/// Published job description. Requirements are fixed once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: JobDescriptionId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<Requirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Hiring-manager supplied content for a new job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptionDraft {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub location: String,
}

/// Reasons a job description draft cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobDescriptionRejected {
    #[error("job description title is required")]
    MissingTitle,
    #[error("job description company is required")]
    MissingCompany,
    #[error("job description needs at least one requirement")]
    NoRequirements,
    #[error("requirement #{index} has empty text")]
    EmptyRequirement { index: usize },
}

impl JobDescriptionDraft {
    /// Trim user input and check the minimum set of fields.
    pub fn validated(mut self) -> Result<Self, JobDescriptionRejected> {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();

        if self.title.is_empty() {
            return Err(JobDescriptionRejected::MissingTitle);
        }
        if self.company.is_empty() {
            return Err(JobDescriptionRejected::MissingCompany);
        }
        if self.requirements.is_empty() {
            return Err(JobDescriptionRejected::NoRequirements);
        }

        for (index, requirement) in self.requirements.iter_mut().enumerate() {
            requirement.text = requirement.text.trim().to_string();
            if requirement.text.is_empty() {
                return Err(JobDescriptionRejected::EmptyRequirement { index });
            }
        }

        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    Grant,
    Hackathon,
    Course,
    Fellowship,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub organization: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTone {
    Positive,
    Constructive,
    Neutral,
}

/// Message a company sent back to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub from: String,
    pub message: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub tone: FeedbackTone,
}
