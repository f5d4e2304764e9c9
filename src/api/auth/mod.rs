//! Authentication endpoints: register, login and logout

use axum::{
    extract::{Form, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::RegisterUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// OAuth2-style login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

impl TokenResponse {
    fn bearer(access_token: String, expiration_minutes: u64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: expiration_minutes * 60,
        }
    }
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
    pub success: bool,
}

/// Register a new user
///
/// POST /auth/register
///
/// Returns a bearer token so the client is logged in immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            email: request.email,
            username: request.username,
            password: request.password,
        })
        .await?;

    let token = state.token_issuer.generate(&user)?;
    let minutes = state.token_issuer.expiration_minutes();

    Ok((StatusCode::CREATED, Json(TokenResponse::bearer(token, minutes))))
}

/// Login with username (or email) and password
///
/// POST /auth/login
///
/// Accepts an OAuth2-style form body and returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?;

    let token = state.token_issuer.generate(&user)?;
    let minutes = state.token_issuer.expiration_minutes();

    Ok(Json(TokenResponse::bearer(token, minutes)))
}

/// Logout the current user
///
/// POST /auth/logout
///
/// Tokens are stateless, so this confirms the user still exists and the
/// client discards the token.
pub async fn logout(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<LogoutResponse>, ApiError> {
    let found = state.user_service.logout(user.id()).await?;

    if !found {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
        success: true,
    }))
}
