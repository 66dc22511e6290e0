//! HTTP-facing error handling for the order service.
//!
//! Every failure leaving the API is rendered as an [`ApiErrorResponse`]
//! carrying a stable error code.
//!
//! # Status Codes
//!
//! | Code | HTTP | Usage |
//! |------|------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed JSON body or path parameter |
//! | `ORDER_NOT_FOUND` | 404 | Unknown order identifier |
//! | `VALIDATION_ERROR` | 422 | Field rules violated, missing identifier |
//! | `STORAGE_ERROR` | 500 | Store unavailable or query failed |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order::OrderError;
use crate::infrastructure::http::ApiErrorResponse;

/// Error codes for the order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body or path could not be parsed.
    InvalidRequest,
    /// Order fields failed validation.
    ValidationError,
    /// Order not found.
    OrderNotFound,
    /// Store failure.
    StorageError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An API error with a code, message, and optional context.
#[derive(Debug, Error)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Malformed request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Render the response body.
    #[must_use]
    pub fn to_body(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match &err {
            OrderError::NotFound { order_id } => {
                Self::new(ErrorCode::OrderNotFound, err.to_string())
                    .with_context("order_id", order_id.to_string())
            }
            OrderError::Validation { field, .. } => {
                Self::new(ErrorCode::ValidationError, err.to_string()).with_context("field", field)
            }
            // Store details stay in the logs.
            OrderError::Storage { .. } => {
                Self::new(ErrorCode::StorageError, "The order store is unavailable")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.code.http_status().is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (self.code.http_status(), Json(self.to_body())).into_response()
    }
}
