use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("scoring failed: {0}")]
    ScoringFailed(#[from] ScoringError),
}

impl IntoResponse for GatewayError {
    /// Collaborator failures surface as a bare 500: the body stays empty,
    /// diagnostics go to the log only.
    fn into_response(self) -> Response {
        match &self {
            GatewayError::ScoringFailed(e) => {
                error!(error = %e, "scoring request failed");
            }
        }

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
