use crate::cli::ServeArgs;
use crate::infra::{http_intake_service, seeded_recruiting_service, AppState};
use crate::routes::with_recruiting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fairhire::config::AppConfig;
use fairhire::error::AppError;
use fairhire::telemetry;
use fairhire::workflows::recruiting::{CompliancePolicy, RecruitingServiceError};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = CompliancePolicy::try_from(&config.shortlist).map_err(RecruitingServiceError::from)?;
    let recruiting = Arc::new(seeded_recruiting_service(policy));
    let intake = Arc::new(http_intake_service(&config.parser, recruiting.clone())?);

    let app = with_recruiting_routes(recruiting, intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        top_n = policy.top_n(),
        dei_mode = policy.dei_mode(),
        parser = %config.parser.base_url,
        "recruiting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
