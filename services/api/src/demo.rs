use crate::infra::seeded_recruiting_service;
use clap::Args;
use fairhire::error::AppError;
use fairhire::workflows::recruiting::{
    CloseShortlistRequest, CompliancePolicy, ComplianceViolation, JobDescriptionId,
    RecruitingServiceError, DEFAULT_TOP_N,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Job description to shortlist against.
    #[arg(long, default_value = "jd-1")]
    pub(crate) jd: String,
    /// Number of leading shortlist entries the DEI guardrail inspects.
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Justification used when the shortlist is not DEI compliant.
    #[arg(long)]
    pub(crate) override_reason: Option<String>,
    /// Disable the DEI guardrail for this run.
    #[arg(long)]
    pub(crate) no_dei: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        jd,
        top_n,
        override_reason,
        no_dei,
    } = args;

    let policy = CompliancePolicy::new(top_n.unwrap_or(DEFAULT_TOP_N), !no_dei)
        .map_err(RecruitingServiceError::from)?;
    let service = seeded_recruiting_service(policy);
    let job_id = JobDescriptionId(jd);
    let job = service.job_description(&job_id)?;

    println!("Shortlist for {} at {} ({})", job.title, job.company, job.id.0);
    for requirement in &job.requirements {
        println!("  - [{:?}] {}", requirement.kind, requirement.text);
    }

    let view = service.shortlist(&job_id)?;
    println!("\nRanked candidates (opt-in tags shown for reporting only):");
    for (rank, entry) in view.entries.iter().enumerate() {
        let tags = if entry.candidate.opt_in_tags.is_empty() {
            "none".to_string()
        } else {
            entry
                .candidate
                .opt_in_tags
                .iter()
                .map(|tag| tag.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "  {}. {} ({}) -> {}",
            rank + 1,
            entry.candidate.name,
            entry.candidate.id.0,
            entry.evaluation.explanation
        );
        println!("     opt-in tags: {}", tags);
    }

    println!(
        "\nDEI guardrail (top {}, {}): {}",
        view.top_n,
        if view.dei_mode { "enabled" } else { "disabled" },
        if view.dei_compliant {
            "compliant"
        } else {
            "not compliant"
        }
    );

    let request = CloseShortlistRequest {
        override_reason,
        user: Some("demo".to_string()),
    };
    match service.close_shortlist(&job_id, request) {
        Ok(closed) => {
            println!(
                "Shortlist closed via {:?} path (audit entry {})",
                closed.closure.path, closed.audit_entry.id
            );
            if let Some(reason) = &closed.closure.override_reason {
                println!("  Override reason: {}", reason);
            }
        }
        Err(RecruitingServiceError::Compliance(ComplianceViolation::MissingOverrideReason)) => {
            println!("Close blocked: pass --override-reason to record a justified override");
        }
        Err(err) => return Err(err.into()),
    }

    println!("\nAudit trail (newest first):");
    for entry in service.audit_log()? {
        let compliance = match entry.dei_compliant {
            Some(true) => " [compliant]",
            Some(false) => " [override]",
            None => "",
        };
        println!(
            "  {} {} {:?} by {}: {}{}",
            entry.id,
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.action,
            entry.user,
            entry.details,
            compliance
        );
        if let Some(reason) = &entry.override_reason {
            println!("      reason: {}", reason);
        }
    }

    let stats = service.pipeline_stats()?;
    println!(
        "\nPipeline: {} candidates, {:.0}% with opt-in tags ({}), {} overrides",
        stats.total_candidates,
        stats.opt_in_pct,
        stats.bias_monitor.label(),
        stats.overrides
    );

    Ok(())
}
