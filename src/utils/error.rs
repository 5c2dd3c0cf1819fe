//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Wrong HTTP verb on the query endpoint
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Request validation failed (missing query, bad price limit)
    #[error("{0}")]
    Validation(String),

    /// Estimated cost over the caller-supplied budget
    #[error("Estimated cost ${estimated:.2} exceeds your set price limit of ${limit:.2}. Please adjust your query or price limit.")]
    BudgetExceeded {
        /// Estimated cost in USD
        estimated: f64,
        /// Caller's price limit in USD
        limit: f64,
    },

    /// Configuration error (missing credential)
    #[error("{0}")]
    Config(String),

    /// External API error
    #[error("External API error: {0}")]
    ExternalApi(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (usage log writes)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) | AppError::BudgetExceeded { .. } => StatusCode::BAD_REQUEST,
            AppError::ExternalApi(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "method_not_allowed",
            AppError::Validation(_) => "invalid_request_error",
            AppError::BudgetExceeded { .. } => "budget_exceeded",
            AppError::Config(_) => "configuration_error",
            AppError::ExternalApi(_) | AppError::HttpClient(_) => "api_error",
            AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        match self {
            AppError::MethodNotAllowed | AppError::Validation(_) => false,
            _ => true,
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log error
        if self.should_log_details() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.error_type(), status);
        }

        // The method check happens before any body parsing, so it answers in plain text
        if matches!(self, AppError::MethodNotAllowed) {
            return (status, "Method Not Allowed").into_response();
        }

        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BudgetExceeded { estimated: 0.01, limit: 0.005 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Config("test".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::ExternalApi("test".to_string()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Internal("test".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_types() {
        assert_eq!(AppError::MethodNotAllowed.error_type(), "method_not_allowed");
        assert_eq!(AppError::Validation("test".to_string()).error_type(), "invalid_request_error");
        assert_eq!(
            AppError::BudgetExceeded { estimated: 1.0, limit: 0.5 }.error_type(),
            "budget_exceeded"
        );
        assert_eq!(AppError::Internal("test".to_string()).error_type(), "internal_error");
    }

    #[test]
    fn test_budget_exceeded_message() {
        let err = AppError::BudgetExceeded { estimated: 1.5, limit: 1.0 };
        assert_eq!(
            err.to_string(),
            "Estimated cost $1.50 exceeds your set price limit of $1.00. Please adjust your query or price limit."
        );

        // Both amounts are rounded to two decimal places
        let err = AppError::BudgetExceeded { estimated: 0.009, limit: 0.008 };
        assert_eq!(
            err.to_string(),
            "Estimated cost $0.01 exceeds your set price limit of $0.01. Please adjust your query or price limit."
        );
    }

    #[test]
    fn test_validation_message_passthrough() {
        // Validation carries the caller-facing message verbatim
        let err = AppError::Validation("Query missing".to_string());
        assert_eq!(err.to_string(), "Query missing");
    }
}
