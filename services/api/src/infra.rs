use fairhire::config::ParserConfig;
use fairhire::workflows::intake::{HttpDocumentParser, IntakeService, ParserError};
use fairhire::workflows::recruiting::{
    CompliancePolicy, InMemoryAuditLog, InMemoryRecruitingRepository, RecruitingSeed,
    RecruitingService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type MemoryRecruitingService =
    RecruitingService<InMemoryRecruitingRepository, InMemoryAuditLog>;
pub(crate) type HttpIntakeService =
    IntakeService<HttpDocumentParser, InMemoryRecruitingRepository, InMemoryAuditLog>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Recruiting service over a freshly seeded in-memory store and audit log.
pub(crate) fn seeded_recruiting_service(policy: CompliancePolicy) -> MemoryRecruitingService {
    let seed = RecruitingSeed::standard();
    let repository = Arc::new(InMemoryRecruitingRepository::seeded(&seed));
    let audit = Arc::new(InMemoryAuditLog::seeded(seed.audit_log.clone()));
    RecruitingService::with_seed(repository, audit, policy, seed)
}

pub(crate) fn http_intake_service(
    config: &ParserConfig,
    recruiting: Arc<MemoryRecruitingService>,
) -> Result<HttpIntakeService, ParserError> {
    let parser = Arc::new(HttpDocumentParser::new(config)?);
    Ok(IntakeService::new(parser, recruiting))
}
