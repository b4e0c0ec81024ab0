//! Unified API error handling
//!
//! All endpoints return `Result<T, ApiError>` so failures share one JSON
//! response format.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::ValidationError;
use crate::service::analysis::AnalysisError;
use crate::service::firms::FirmsError;
use crate::service::UpstreamError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Input constraint violation (400, or 413 for oversized uploads)
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed request body or parameters (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// External service failure (502)
    #[error("External service error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Required API key absent, feature disabled (503)
    #[error("Service not configured: {0}")]
    NotConfigured(String),

    /// Required API key absent for a hard dependency (500)
    #[error("{0}")]
    MissingKey(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    #[allow(dead_code)] // Reserved for unexpected failures
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MissingKey(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::Validation(ValidationError::TooLarge { .. }) => "payload_too_large",
            ApiError::Validation(_) => "validation_error",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Upstream(_) => "upstream_error",
            ApiError::NotConfigured(_) => "not_configured",
            ApiError::MissingKey(_) => "missing_api_key",
            ApiError::Internal(_) => "internal_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Disabled => ApiError::NotConfigured("OPENAI_API_KEY is missing".into()),
            AnalysisError::Upstream(e) => ApiError::Upstream(e),
        }
    }
}

impl From<FirmsError> for ApiError {
    fn from(err: FirmsError) -> Self {
        match err {
            FirmsError::MissingKey => ApiError::MissingKey(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_UPLOAD_BYTES;

    #[test]
    fn status_codes_match_error_kinds() {
        let oversize = ApiError::Validation(ValidationError::TooLarge {
            size: MAX_UPLOAD_BYTES + 1,
            limit: MAX_UPLOAD_BYTES,
        });
        assert_eq!(oversize.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let bad_type = ApiError::Validation(ValidationError::UnsupportedType {
            kind: "image",
            mime: "image/gif".to_string(),
        });
        assert_eq!(bad_type.status_code(), StatusCode::BAD_REQUEST);

        let upstream = ApiError::Upstream(UpstreamError::EmptyReply);
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);

        let disabled: ApiError = AnalysisError::Disabled.into();
        assert_eq!(disabled.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let missing: ApiError = FirmsError::MissingKey.into();
        assert_eq!(missing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
