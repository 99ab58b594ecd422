use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::audit::{AuditAction, AuditLogEntry};
use super::domain::{
    Candidate, CandidateId, Experience, Feedback, FeedbackTone, JobDescription, JobDescriptionId,
    OptInTag, Opportunity, OpportunityKind, Post, Project, Requirement, Skill, SkillLevel,
    TagCategory,
};

/// Fixed demo dataset the entity store starts from and resets to.
#[derive(Debug, Clone)]
pub struct RecruitingSeed {
    pub candidates: Vec<Candidate>,
    pub job_descriptions: Vec<JobDescription>,
    pub opportunities: Vec<Opportunity>,
    pub feedback: Vec<Feedback>,
    pub audit_log: Vec<AuditLogEntry>,
}

impl RecruitingSeed {
    pub fn standard() -> Self {
        Self {
            candidates: standard_candidates(),
            job_descriptions: standard_job_descriptions(),
            opportunities: standard_opportunities(),
            feedback: standard_feedback(),
            audit_log: standard_audit_log(),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tag(label: &str, category: TagCategory) -> OptInTag {
    OptInTag {
        label: label.to_string(),
        category,
    }
}

fn experience(title: &str, company: &str, period: &str, description: &str) -> Experience {
    Experience {
        title: title.to_string(),
        company: company.to_string(),
        period: period.to_string(),
        description: description.to_string(),
    }
}

fn project(title: &str, description: &str, technologies: &[&str], link: Option<&str>) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        technologies: technologies.iter().map(|tech| tech.to_string()).collect(),
        link: link.map(str::to_string),
    }
}

fn standard_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: CandidateId("c-1".to_string()),
            name: "Sofia Rossi".to_string(),
            location: "Milan, Italy".to_string(),
            summary: "Full-stack developer with 5 years of React and Node.js experience. Passionate about UI/UX and web accessibility.".to_string(),
            skills: vec![
                Skill::new("React", SkillLevel::Expert),
                Skill::new("TypeScript", SkillLevel::Advanced),
                Skill::new("Node.js", SkillLevel::Advanced),
                Skill::new("PostgreSQL", SkillLevel::Intermediate),
                Skill::new("UI/UX Design", SkillLevel::Intermediate),
                Skill::new("Accessibility", SkillLevel::Advanced),
            ],
            experiences: vec![
                experience(
                    "Senior Frontend Developer",
                    "TechCorp Italia",
                    "2021 - Present",
                    "Leads React application development, mentors junior developers, builds an accessible design system.",
                ),
                experience(
                    "Full Stack Developer",
                    "Startup Innovativa",
                    "2019 - 2021",
                    "Full-stack development of an e-commerce platform, API integration, performance tuning.",
                ),
            ],
            projects: vec![
                project(
                    "Accessible Analytics Dashboard",
                    "Real-time data dashboard built to WCAG 2.1 AA.",
                    &["React", "D3.js", "ARIA", "TypeScript"],
                    Some("https://github.com/example"),
                ),
                project(
                    "Open Source Design System",
                    "Reusable component library documented with Storybook.",
                    &["React", "Tailwind", "Storybook"],
                    None,
                ),
            ],
            posts: vec![
                Post {
                    id: "p1".to_string(),
                    content: "Spoke at Women in Tech Milan today about accessibility in web design. An accessible web is a web for everyone.".to_string(),
                    date: date(2025, 1, 10),
                    likes: 47,
                },
                Post {
                    id: "p2".to_string(),
                    content: "Our team just reached 100% test coverage. Code quality matters.".to_string(),
                    date: date(2025, 1, 5),
                    likes: 23,
                },
            ],
            opt_in_tags: vec![
                tag("Women in Tech", TagCategory::Diversity),
                tag("First-generation graduate", TagCategory::Background),
            ],
            connections: 142,
        },
        Candidate {
            id: CandidateId("c-2".to_string()),
            name: "Marco Bianchi".to_string(),
            location: "Rome, Italy".to_string(),
            summary: "Backend engineer specialised in microservices and cloud architecture. Open source contributor.".to_string(),
            skills: vec![
                Skill::new("Python", SkillLevel::Expert),
                Skill::new("Django", SkillLevel::Advanced),
                Skill::new("AWS", SkillLevel::Advanced),
                Skill::new("Docker", SkillLevel::Expert),
                Skill::new("Kubernetes", SkillLevel::Intermediate),
            ],
            experiences: vec![experience(
                "Backend Engineer",
                "FinTech Solutions",
                "2020 - Present",
                "Designs and ships scalable microservices deployed on AWS.",
            )],
            projects: vec![project(
                "Open Source API Gateway",
                "Gateway for microservice traffic with rate limiting and authentication.",
                &["Python", "FastAPI", "Redis"],
                None,
            )],
            posts: Vec::new(),
            opt_in_tags: Vec::new(),
            connections: 87,
        },
        Candidate {
            id: CandidateId("c-3".to_string()),
            name: "Lucia Verdi".to_string(),
            location: "Turin, Italy".to_string(),
            summary: "UX/UI designer with a psychology background. Focused on inclusive design and user research.".to_string(),
            skills: vec![
                Skill::new("Figma", SkillLevel::Expert),
                Skill::new("User Research", SkillLevel::Advanced),
                Skill::new("Prototyping", SkillLevel::Expert),
                Skill::new("Accessibility Design", SkillLevel::Advanced),
                Skill::new("HTML/CSS", SkillLevel::Intermediate),
            ],
            experiences: vec![experience(
                "Senior UX Designer",
                "Design Studio",
                "2019 - Present",
                "Runs user research, designs interfaces, maintains the design system.",
            )],
            projects: vec![project(
                "Healthcare App Redesign",
                "Full redesign of a healthcare app focused on accessibility for older users.",
                &["Figma", "User Testing", "WCAG"],
                None,
            )],
            posts: vec![Post {
                id: "p3".to_string(),
                content: "Inclusive design is not optional, it is a responsibility.".to_string(),
                date: date(2025, 1, 8),
                likes: 89,
            }],
            opt_in_tags: vec![
                tag("Women in Tech", TagCategory::Diversity),
                tag("Career changer", TagCategory::Background),
            ],
            connections: 203,
        },
        Candidate {
            id: CandidateId("c-4".to_string()),
            name: "Ahmed Hassan".to_string(),
            location: "Bologna, Italy".to_string(),
            summary: "Data scientist with ML and AI experience. PhD in Computer Science.".to_string(),
            skills: vec![
                Skill::new("Machine Learning", SkillLevel::Expert),
                Skill::new("Python", SkillLevel::Expert),
                Skill::new("TensorFlow", SkillLevel::Advanced),
                Skill::new("SQL", SkillLevel::Advanced),
                Skill::new("Statistics", SkillLevel::Expert),
            ],
            experiences: vec![experience(
                "Data Scientist",
                "AI Lab",
                "2021 - Present",
                "Builds ML models, analyses data, applied research.",
            )],
            projects: vec![project(
                "Predictive Maintenance System",
                "Predictive maintenance platform for industrial equipment.",
                &["Python", "TensorFlow", "Kafka"],
                None,
            )],
            posts: Vec::new(),
            opt_in_tags: vec![tag("International background", TagCategory::Diversity)],
            connections: 95,
        },
        Candidate {
            id: CandidateId("c-5".to_string()),
            name: "Giulia Neri".to_string(),
            location: "Florence, Italy".to_string(),
            summary: "DevOps engineer focused on automation and CI/CD. Conference speaker.".to_string(),
            skills: vec![
                Skill::new("Terraform", SkillLevel::Expert),
                Skill::new("Jenkins", SkillLevel::Advanced),
                Skill::new("AWS", SkillLevel::Advanced),
                Skill::new("Linux", SkillLevel::Expert),
                Skill::new("Monitoring", SkillLevel::Advanced),
            ],
            experiences: vec![experience(
                "DevOps Engineer",
                "Cloud Services Inc",
                "2020 - Present",
                "Infrastructure as code, CI/CD pipelines, monitoring and alerting.",
            )],
            projects: vec![project(
                "Infrastructure Automation",
                "Framework for automated multi-cloud deployments.",
                &["Terraform", "Ansible", "GitLab CI"],
                None,
            )],
            posts: vec![Post {
                id: "p4".to_string(),
                content: "Automation is not about replacing humans, it's about freeing them to do more creative work!".to_string(),
                date: date(2025, 1, 12),
                likes: 56,
            }],
            opt_in_tags: vec![tag("Women in Tech", TagCategory::Diversity)],
            connections: 178,
        },
    ]
}

fn standard_job_descriptions() -> Vec<JobDescription> {
    vec![
        JobDescription {
            id: JobDescriptionId("jd-1".to_string()),
            title: "Senior Frontend Developer".to_string(),
            company: "TechCorp Italia".to_string(),
            description: "We are looking for a Senior Frontend Developer to join our product team and work on modern web projects.".to_string(),
            requirements: vec![
                Requirement::must("React"),
                Requirement::must("TypeScript"),
                Requirement::must("5+ years experience"),
                Requirement::nice("UI/UX Design"),
                Requirement::nice("Accessibility"),
                Requirement::nice("Node.js"),
            ],
            salary: Some("45,000 - 65,000 EUR".to_string()),
            location: "Milan (Hybrid)".to_string(),
            created_at: instant(2025, 1, 10, 9, 0),
        },
        JobDescription {
            id: JobDescriptionId("jd-2".to_string()),
            title: "Backend Engineer".to_string(),
            company: "FinTech Solutions".to_string(),
            description: "Backend engineer to build scalable microservices in a cloud environment.".to_string(),
            requirements: vec![
                Requirement::must("Python"),
                Requirement::must("Microservices"),
                Requirement::must("AWS"),
                Requirement::nice("Docker"),
                Requirement::nice("Kubernetes"),
            ],
            salary: Some("50,000 - 70,000 EUR".to_string()),
            location: "Rome (Remote)".to_string(),
            created_at: instant(2025, 1, 8, 9, 0),
        },
    ]
}

fn standard_opportunities() -> Vec<Opportunity> {
    vec![
        Opportunity {
            id: "o1".to_string(),
            title: "Women in Tech Scholarship".to_string(),
            kind: OpportunityKind::Grant,
            organization: "Tech Foundation".to_string(),
            description: "Scholarship for women in tech specialising in AI/ML.".to_string(),
            deadline: Some(date(2025, 3, 31)),
            link: Some("https://example.com".to_string()),
        },
        Opportunity {
            id: "o2".to_string(),
            title: "Sustainability Hackathon 2025".to_string(),
            kind: OpportunityKind::Hackathon,
            organization: "Green Tech".to_string(),
            description: "48 hours of coding for technology with a positive environmental impact.".to_string(),
            deadline: Some(date(2025, 2, 15)),
            link: None,
        },
        Opportunity {
            id: "o3".to_string(),
            title: "Full Stack Developer Bootcamp".to_string(),
            kind: OpportunityKind::Course,
            organization: "Code Academy".to_string(),
            description: "Intensive 12-week course to become a full stack developer.".to_string(),
            deadline: None,
            link: None,
        },
        Opportunity {
            id: "o4".to_string(),
            title: "Tech Leadership Fellowship".to_string(),
            kind: OpportunityKind::Fellowship,
            organization: "Leadership Institute".to_string(),
            description: "Six-month programme building leadership skills in tech.".to_string(),
            deadline: Some(date(2025, 4, 30)),
            link: None,
        },
    ]
}

fn standard_feedback() -> Vec<Feedback> {
    vec![
        Feedback {
            id: "f1".to_string(),
            from: "TechCorp Italia".to_string(),
            message: "Your profile is very interesting! We would like to meet you for an introductory video call.".to_string(),
            date: date(2025, 1, 12),
            tone: FeedbackTone::Positive,
        },
        Feedback {
            id: "f2".to_string(),
            from: "Startup Innovativa".to_string(),
            message: "Thanks for applying. Right now we are prioritising profiles with more DevOps experience.".to_string(),
            date: date(2025, 1, 8),
            tone: FeedbackTone::Constructive,
        },
        Feedback {
            id: "f3".to_string(),
            from: "Design Studio".to_string(),
            message: "We received your application and will get back to you within two weeks.".to_string(),
            date: date(2025, 1, 5),
            tone: FeedbackTone::Neutral,
        },
    ]
}

fn standard_audit_log() -> Vec<AuditLogEntry> {
    vec![
        AuditLogEntry {
            id: "a-1".to_string(),
            timestamp: instant(2025, 1, 11, 9, 15),
            action: AuditAction::OverrideTriggered,
            user: "hiring.manager@fintech.example".to_string(),
            details: "DEI guardrail override for JD: Backend Engineer".to_string(),
            dei_compliant: Some(false),
            override_reason: Some("Business critical role that must be filled by month end. Team committed to revisiting the sourcing pipeline.".to_string()),
        },
        AuditLogEntry {
            id: "a-2".to_string(),
            timestamp: instant(2025, 1, 12, 10, 30),
            action: AuditAction::JdCreated,
            user: "hiring.manager@techcorp.example".to_string(),
            details: "Created JD: Senior Frontend Developer".to_string(),
            dei_compliant: Some(true),
            override_reason: None,
        },
        AuditLogEntry {
            id: "a-3".to_string(),
            timestamp: instant(2025, 1, 12, 11, 45),
            action: AuditAction::CandidateAdded,
            user: "system".to_string(),
            details: "Candidate added to shortlist: Sofia Rossi (score: 85%)".to_string(),
            dei_compliant: None,
            override_reason: None,
        },
    ]
}
