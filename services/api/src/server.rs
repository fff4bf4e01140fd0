use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_assignment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use timetable::config::AppConfig;
use timetable::error::AppError;
use timetable::scheduling::assignments::AssignmentWriter;
use timetable::telemetry;
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

    let store = Arc::new(load_store(args.snapshot.as_deref())?);
    let writer = Arc::new(AssignmentWriter::new(
        store,
        config.scheduling.conflict_policy(),
    ));

    let app = with_assignment_routes(writer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_block_load = config.scheduling.max_block_load,
        "timetable assignment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
