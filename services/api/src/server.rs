use crate::cli::ServeArgs;
use crate::infra::{build_marketplace, AppState};
use crate::routes::with_marketplace_routes;
use crate::scheduler::{self, Sweeps};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use estate_board::config::AppConfig;
use estate_board::error::AppError;
use estate_board::telemetry;
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

    let market = build_marketplace(&config.marketplace)?;
    let sweeps = Sweeps::for_marketplace(&market);

    let app = with_marketplace_routes(&market)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    tokio::spawn(scheduler::run(
        sweeps,
        config.marketplace.sweep_interval_secs,
    ));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "estate board marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
