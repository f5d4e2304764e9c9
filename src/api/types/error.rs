//! API error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Machine-readable error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    PermissionError,
    NotFoundError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::PermissionError => write!(f, "permission_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                },
            },
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiErrorType::AuthenticationError,
            message,
        )
    }

    /// Permission error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiErrorType::PermissionError, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::AlreadyExists { message } => Self::bad_request(message),
            DomainError::UnauthorizedAccess { message } => Self::forbidden(message),
            DomainError::InvalidCredentials { message } => Self::unauthorized(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid status");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.response.error.error_type,
            ApiErrorType::InvalidRequestError
        );
        assert_eq!(err.response.error.message, "Invalid status");
    }

    #[test]
    fn test_domain_error_conversion() {
        let api_err: ApiError = DomainError::not_found("News item not found").into();
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);

        let api_err: ApiError = DomainError::already_exists("Duplicate link").into();
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);

        let api_err: ApiError = DomainError::unauthorized_access("Not the owner").into();
        assert_eq!(api_err.status, StatusCode::FORBIDDEN);

        let api_err: ApiError = DomainError::invalid_credentials("Bad password").into();
        assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Invalid token");
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("authentication_error"));
        assert!(json.contains("Invalid token"));
    }

    #[test]
    fn test_all_error_types() {
        assert_eq!(ApiError::bad_request("").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("").status, StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("").status, StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("").status, StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
