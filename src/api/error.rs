//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::AcquisitionError;

/// Message shown to end users when no data could be produced
pub const DATA_UNAVAILABLE_MESSAGE: &str =
    "Safety data is currently unavailable. Please try again later.";

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

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Every acquisition tier failed (503)
    #[error("{}", DATA_UNAVAILABLE_MESSAGE)]
    DataUnavailable,

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::DataUnavailable => "data_unavailable",
            ApiError::Internal(_) => "internal_error",
        };

        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            request_id = %request_id,
            message = %self,
            "API error"
        );

        // Internal details stay in the log
        let message = match self {
            ApiError::Internal(_) => "An unexpected error occurred.".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message,
            request_id,
        })
    }
}

impl From<AcquisitionError> for ApiError {
    fn from(err: AcquisitionError) -> Self {
        match err {
            AcquisitionError::AllTiersExhausted => ApiError::DataUnavailable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Query extractor settings that report malformed parameters as [`ApiError::BadRequest`]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}
