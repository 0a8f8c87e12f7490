use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    advisory::AdvisorClient,
    config::Config,
    handlers::{self, AppState},
    logging::SensitiveApiKey,
    metrics,
    signals::setup_signal_handlers,
    snapshots::SnapshotStore,
};

/// Request bodies are small JSON records
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Start the HTTP server
///
/// This function:
/// 1. Initializes metrics
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Opens the snapshot store
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path)?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let snapshots = Arc::new(SnapshotStore::open(&config.snapshots.path).await?);

    let app_state = AppState {
        config: config_swap,
        advisor: AdvisorClient::new(reqwest::Client::new()),
        snapshots,
    };

    let app = create_router(app_state, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting car cost advisor on {}", addr);
    info!(
        advisor_enabled = config.advisor.enabled,
        advisor_model = %config.advisor.model,
        api_key = %SensitiveApiKey::new(&config.advisor.api_key),
        snapshots = %config.snapshots.path.display(),
        "Configuration loaded"
    );
    if config.advisor.enabled && !config.advisor.is_usable() {
        tracing::warn!("Advisor enabled without an API key; /api/ai/* will return 503");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(app_state: AppState, metrics_handle: Option<Arc<PrometheusHandle>>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/profiles", get(handlers::profiles::list_profiles))
        .route("/api/profiles/:key", get(handlers::profiles::get_profile))
        .route("/api/calculate", post(handlers::calculate::handle_calculate))
        .route("/api/ai/analyze", post(handlers::advisory::handle_analyze))
        .route("/api/ai/prefill", post(handlers::advisory::handle_prefill))
        .route(
            "/api/snapshots",
            get(handlers::snapshots::list_snapshots).post(handlers::snapshots::save_snapshot),
        )
        .route(
            "/api/snapshots/:id",
            get(handlers::snapshots::get_snapshot).delete(handlers::snapshots::delete_snapshot),
        )
        .with_state(app_state);

    let router = match metrics_handle {
        Some(handle) => Router::new()
            .route("/metrics", get(handlers::metrics_handler::metrics))
            .with_state(handle)
            .merge(api_routes),
        None => api_routes,
    };

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
