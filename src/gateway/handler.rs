use std::collections::HashMap;

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::retrieval::EssayIndex;
use crate::scoring::{EssayRequest, EvaluationResponse};

/// Scores one essay. Collaborator failures become an empty-body 500;
/// a malformed model reply still yields a 200 with default scores.
#[instrument(skip(state, request))]
pub async fn score_essay_handler<R>(
    State(state): State<HandlerState<R>>,
    Json(request): Json<EssayRequest>,
) -> Result<Json<EvaluationResponse>, GatewayError>
where
    R: EssayIndex + 'static,
{
    debug!(
        question_len = request.question.len(),
        essay_len = request.essay.len(),
        "scoring request received"
    );

    let evaluation = state.scorer.score_essay(&request).await?;
    Ok(Json(evaluation))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub average_scores_by_band: HashMap<String, f64>,
    pub band_distribution: HashMap<String, u64>,
}

/// Reports running score averages and band counts.
#[instrument(skip(state))]
pub async fn metrics_handler<R>(State(state): State<HandlerState<R>>) -> Json<MetricsReport>
where
    R: EssayIndex + 'static,
{
    Json(MetricsReport {
        average_scores_by_band: state.metrics.average_scores_by_band(),
        band_distribution: state.metrics.band_distribution(),
    })
}

/// Clears the metrics store.
#[instrument(skip(state))]
pub async fn reset_metrics_handler<R>(State(state): State<HandlerState<R>>) -> StatusCode
where
    R: EssayIndex + 'static,
{
    state.metrics.reset();
    StatusCode::NO_CONTENT
}
