use chrono::{DateTime, Utc};
use serde::Serialize;

use super::audit::AuditLogEntry;
use super::domain::{Candidate, Feedback, JobDescription, Opportunity};

/// Flat document capturing the entire entity store for download.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSnapshot {
    pub candidates: Vec<Candidate>,
    pub job_descriptions: Vec<JobDescription>,
    pub opportunities: Vec<Opportunity>,
    pub feedback: Vec<Feedback>,
    pub audit_log: Vec<AuditLogEntry>,
    pub export_date: DateTime<Utc>,
}

impl ExportSnapshot {
    pub fn file_name(&self) -> String {
        format!("recruiting-export-{}.json", self.export_date.timestamp_millis())
    }
}
