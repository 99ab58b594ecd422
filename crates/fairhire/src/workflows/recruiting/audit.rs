use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    JdCreated,
    ShortlistClosed,
    OverrideTriggered,
    CandidateAdded,
}

/// Immutable record of a critical action. Once written it is never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dei_compliant: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
}

/// Content of an entry before the log stamps it with an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub user: String,
    pub details: String,
    pub dei_compliant: Option<bool>,
    pub override_reason: Option<String>,
}

/// Ordered, append-only log with no edit or removal path.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: Vec<AuditLogEntry>,
}

impl AuditLog {
    pub fn from_entries(entries: Vec<AuditLogEntry>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, event: AuditEvent, timestamp: DateTime<Utc>) -> AuditLogEntry {
        let entry = AuditLogEntry {
            id: format!("a-{}", self.entries.len() + 1),
            timestamp,
            action: event.action,
            user: event.user,
            details: event.details,
            dei_compliant: event.dei_compliant,
            override_reason: event.override_reason,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Entries in the order they were written.
    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    /// Newest entries first.
    pub fn recent(&self, limit: usize) -> Vec<AuditLogEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append-only sink the service writes audit events to.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent) -> Result<AuditLogEntry, AuditError>;
    fn entries(&self) -> Result<Vec<AuditLogEntry>, AuditError>;
    /// Replace the whole log with seed entries when the demo is reset.
    fn restore(&self, entries: Vec<AuditLogEntry>) -> Result<(), AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
