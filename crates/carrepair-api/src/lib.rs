//! CarRepair API /v1: document validation and session inspection endpoints
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use carrepair_core::AppConfig;
use metrics::Metrics;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            config: Arc::new(config),
            metrics: Arc::new(Metrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/documents/classify", post(handlers::classify))
        .route("/v1/documents/validate", post(handlers::validate))
        .route("/v1/documents/format", post(handlers::format))
        .route("/v1/documents/generate", get(handlers::generate))
        .route("/v1/session/inspect", post(handlers::inspect_session))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.listen_addr.clone();
    let app = create_app(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CarRepair API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
