use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoquery_domain::DomainError;
use serde_json::json;
use tracing::error;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::EmptyQuery(msg) | DomainError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            DomainError::DuplicateRecord(_) => (StatusCode::CONFLICT, self.0.to_string()),

            DomainError::OriginUnavailable(_) | DomainError::InvalidOriginResponse(_) => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }

            DomainError::OriginTimeout { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, self.0.to_string())
            }

            DomainError::DatabaseError(_) | DomainError::ConfigError(_) => {
                error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
