use std::sync::Arc;

use super::common::*;
use crate::workflows::recruiting::audit::{AuditAction, AuditSink};
use crate::workflows::recruiting::compliance::{ClosePath, ComplianceViolation};
use crate::workflows::recruiting::domain::{
    CandidateDraft, CandidateId, JobDescriptionDraft, JobDescriptionId, JobDescriptionRejected,
    OptInTag, Requirement, SkillLevel, TagCategory,
};
use crate::workflows::recruiting::repository::RecruitingRepository;
use crate::workflows::recruiting::{
    BiasMonitorStatus, CloseShortlistRequest, CompliancePolicy, InMemoryAuditLog,
    RecruitingService, RecruitingServiceError,
};

fn jd(id: &str) -> JobDescriptionId {
    JobDescriptionId(id.to_string())
}

fn draft() -> JobDescriptionDraft {
    JobDescriptionDraft {
        title: "Data Engineer".to_string(),
        company: "Acme".to_string(),
        description: "Own the ingestion pipeline.".to_string(),
        requirements: vec![Requirement::must("Python"), Requirement::nice("SQL")],
        salary: Some("  ".to_string()),
        location: "Remote".to_string(),
    }
}

#[test]
fn compliant_close_appends_shortlist_closed_entry() {
    let (service, _, audit) = build_service();

    let closed = service
        .close_shortlist(
            &jd("jd-1"),
            CloseShortlistRequest {
                override_reason: None,
                user: Some("maria".to_string()),
            },
        )
        .expect("compliant shortlist closes");

    assert_eq!(closed.closure.path, ClosePath::Standard);
    assert_eq!(closed.audit_entry.id, "a-4");
    assert_eq!(closed.audit_entry.action, AuditAction::ShortlistClosed);
    assert_eq!(closed.audit_entry.user, "maria");
    assert_eq!(closed.audit_entry.dei_compliant, Some(true));
    assert_eq!(
        closed.audit_entry.details,
        "Shortlist closed for JD: Senior Frontend Developer"
    );
    assert_eq!(audit.entries().expect("entries").len(), 4);
}

#[test]
fn non_compliant_close_without_reason_records_nothing() {
    let (service, _, audit) = build_service_with_policy(strict_policy());

    let view = service.shortlist(&jd("jd-2")).expect("shortlist builds");
    assert!(!view.dei_compliant);
    assert_eq!(view.top_n, 1);

    match service.close_shortlist(
        &jd("jd-2"),
        CloseShortlistRequest {
            override_reason: Some("   ".to_string()),
            user: None,
        },
    ) {
        Err(RecruitingServiceError::Compliance(ComplianceViolation::MissingOverrideReason)) => {}
        other => panic!("expected missing override reason, got {other:?}"),
    }

    assert_eq!(audit.entries().expect("entries").len(), 3);
}

#[test]
fn override_close_records_reason_and_defaults_actor() {
    let (service, _, _) = build_service_with_policy(strict_policy());

    let closed = service
        .close_shortlist(
            &jd("jd-2"),
            CloseShortlistRequest {
                override_reason: Some("Niche role, pool reviewed".to_string()),
                user: None,
            },
        )
        .expect("override accepted");

    assert_eq!(closed.closure.path, ClosePath::Override);
    assert_eq!(closed.audit_entry.action, AuditAction::OverrideTriggered);
    assert_eq!(closed.audit_entry.user, "system");
    assert_eq!(closed.audit_entry.dei_compliant, Some(false));
    assert_eq!(
        closed.audit_entry.override_reason.as_deref(),
        Some("Niche role, pool reviewed")
    );

    let stats = service.pipeline_stats().expect("stats");
    assert_eq!(stats.overrides, 2);
    assert_eq!(stats.audit_entries, 4);
}

#[test]
fn shortlist_reflects_roster_changes() {
    let (service, _, _) = build_service_with_policy(strict_policy());
    assert!(!service.shortlist(&jd("jd-2")).expect("shortlist").dei_compliant);

    service
        .add_opt_in_tag(
            &CandidateId("c-2".to_string()),
            OptInTag {
                label: "Career changer".to_string(),
                category: TagCategory::Background,
            },
        )
        .expect("tag added");

    let view = service.shortlist(&jd("jd-2")).expect("shortlist");
    assert!(view.dei_compliant);
    assert_eq!(view.entries[0].candidate.id.0, "c-2");
    assert_eq!(view.entries[0].score(), 77);
}

#[test]
fn create_job_description_assigns_id_and_audits() {
    let (service, repository, audit) = build_service();

    let job = service
        .create_job_description(draft(), Some("hiring-manager"))
        .expect("draft accepted");

    assert_eq!(job.id.0, "jd-3");
    assert_eq!(job.salary, None);
    assert_eq!(repository.job_descriptions().expect("list")[0].id, job.id);

    let entries = audit.entries().expect("entries");
    let last = entries.last().expect("audit entry");
    assert_eq!(last.action, AuditAction::JdCreated);
    assert_eq!(last.details, "Created JD: Data Engineer");
    assert_eq!(last.dei_compliant, Some(true));
}

#[test]
fn create_job_description_rejects_invalid_drafts_without_auditing() {
    let (service, _, audit) = build_service();
    let mut invalid = draft();
    invalid.title = " ".to_string();

    match service.create_job_description(invalid, None) {
        Err(RecruitingServiceError::Rejected(JobDescriptionRejected::MissingTitle)) => {}
        other => panic!("expected rejected draft, got {other:?}"),
    }
    assert_eq!(audit.entries().expect("entries").len(), 3);
}

#[test]
fn register_candidate_and_add_skill() {
    let (service, _, audit) = build_service();

    let candidate = service
        .register_candidate(
            CandidateDraft {
                name: "Ana Lima".to_string(),
                location: "Lisbon".to_string(),
                summary: String::new(),
                skills: Vec::new(),
                opt_in_tags: Vec::new(),
            },
            None,
        )
        .expect("candidate registered");
    assert_eq!(candidate.id.0, "c-6");

    let updated = service
        .add_skill(&candidate.id, "Python", None)
        .expect("skill added");
    assert_eq!(updated.skills[0].level, Some(SkillLevel::Intermediate));

    let evaluation = service
        .evaluate_match(&candidate.id, &jd("jd-2"))
        .expect("match");
    assert_eq!(evaluation.score, 23);

    let entries = audit.entries().expect("entries");
    assert_eq!(entries.last().map(|entry| entry.action), Some(AuditAction::CandidateAdded));
}

#[test]
fn blank_candidate_input_is_rejected() {
    let (service, _, _) = build_service();

    assert!(matches!(
        service.add_skill(&CandidateId("c-1".to_string()), "  ", None),
        Err(RecruitingServiceError::InvalidCandidate(_))
    ));
    assert!(matches!(
        service.add_skill(&CandidateId("c-404".to_string()), "Go", None),
        Err(RecruitingServiceError::CandidateNotFound(_))
    ));
}

#[test]
fn audit_log_lists_newest_first() {
    let (service, _, _) = build_service();
    service
        .create_job_description(draft(), None)
        .expect("draft accepted");

    let log = service.audit_log().expect("audit log");
    let ids: Vec<&str> = log.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["a-4", "a-3", "a-2", "a-1"]);
}

#[test]
fn reset_restores_seed_including_audit_log() {
    let (service, _, _) = build_service();
    service
        .create_job_description(draft(), None)
        .expect("draft accepted");
    service
        .close_shortlist(&jd("jd-1"), CloseShortlistRequest::default())
        .expect("closes");

    service.reset().expect("reset");

    assert_eq!(service.job_descriptions().expect("jobs").len(), 2);
    assert_eq!(service.audit_log().expect("audit").len(), 3);
    assert_eq!(service.candidates().expect("candidates").len(), 5);
}

#[test]
fn pipeline_stats_report_opt_in_share() {
    let (service, _, _) = build_service();
    let stats = service.pipeline_stats().expect("stats");

    assert_eq!(stats.total_candidates, 5);
    assert_eq!(stats.candidates_with_opt_in, 4);
    assert!((stats.opt_in_pct - 80.0).abs() < f32::EPSILON);
    assert_eq!(stats.bias_monitor, BiasMonitorStatus::Compliant);
    assert_eq!(stats.job_descriptions, 2);
    assert_eq!(stats.overrides, 1);
}

#[test]
fn export_collects_every_collection() {
    let (service, _, _) = build_service();
    let snapshot = service.export().expect("export");

    assert_eq!(snapshot.candidates.len(), 5);
    assert_eq!(snapshot.job_descriptions.len(), 2);
    assert_eq!(snapshot.opportunities.len(), 4);
    assert_eq!(snapshot.feedback.len(), 3);
    assert_eq!(snapshot.audit_log.len(), 3);
    assert!(snapshot.file_name().starts_with("recruiting-export-"));
    assert!(snapshot.file_name().ends_with(".json"));
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = RecruitingService::new(
        Arc::new(UnavailableRepository),
        Arc::new(InMemoryAuditLog::default()),
        CompliancePolicy::default(),
    );

    assert!(matches!(
        service.shortlist(&jd("jd-1")),
        Err(RecruitingServiceError::Repository(_))
    ));
}
