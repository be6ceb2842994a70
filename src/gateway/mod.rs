//! HTTP gateway (Axum) for essay scoring and metrics.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::{metrics_handler, reset_metrics_handler, score_essay_handler};
pub use state::HandlerState;

use crate::retrieval::EssayIndex;

/// Builds the application router.
pub fn create_router_with_state<R>(state: HandlerState<R>) -> Router
where
    R: EssayIndex + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ai/scoreEssay", post(score_essay_handler))
        .route("/ai/metrics", get(metrics_handler))
        .route("/ai/metrics/reset", post(reset_metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
