use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use textflow::{CoreError, ModelError, TextflowError};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, missing fields or unknown model key
    #[error("{0}")]
    BadRequest(String),

    /// The model backend failed or could not be reached
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TextflowError> for ApiError {
    fn from(err: TextflowError) -> Self {
        match err {
            TextflowError::Core(e @ (CoreError::InvalidRequest(_) | CoreError::UnknownModel(_))) => {
                Self::BadRequest(e.to_string())
            }
            TextflowError::Model(e @ ModelError::Status { status: 404, .. }) => {
                tracing::warn!("model missing on backend: {}", e);
                Self::BadGateway(format!("model not available on backend: {}", e))
            }
            TextflowError::Model(e) => {
                tracing::warn!("model backend failed: {}", e);
                Self::BadGateway(format!("model backend unreachable or failed: {}", e))
            }
            TextflowError::Core(e @ CoreError::Invocation(_)) => {
                tracing::warn!("model backend failed: {}", e);
                Self::BadGateway(e.to_string())
            }
            other => {
                tracing::error!("workflow failed: {}", other);
                Self::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
