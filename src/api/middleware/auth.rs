//! Bearer token authentication for protected routes

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{User, UserId};

/// Extractor that requires a valid bearer token
///
/// Validates the token from the `Authorization: Bearer <token>` header,
/// then loads the user it identifies.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating bearer token");

        let claims = state
            .token_issuer
            .validate(&token)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        let user = state
            .user_service
            .get(&UserId::new(claims.user_id()))
            .await
            .map_err(|_| ApiError::unauthorized("User not found"))?;

        if !user.is_active() {
            return Err(ApiError::unauthorized("User account is deactivated"));
        }

        Ok(RequireUser(user))
    }
}

/// Extract the token from the Authorization header
pub fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' header",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        let result = extract_bearer_token(&headers);
        assert_eq!(result.unwrap(), "eyJhbGciOiJIUzI1NiJ9.test");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let err = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let result = extract_bearer_token(&headers);
        assert!(result.is_err());
    }
}
