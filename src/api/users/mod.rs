//! User profile endpoints

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;
use crate::infrastructure::user::{ChangePasswordRequest, UpdateProfileRequest};

const DEFAULT_LIST_LIMIT: usize = 100;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_me).put(update_me))
        .route("/me/password", put(change_password))
        .route("/{id}", get(get_user))
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().to_string(),
            username: user.username().to_string(),
            is_active: user.is_active(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Query parameters for the user listing
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<usize>,
}

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub email: Option<String>,
    pub username: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize)]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Get the current authenticated user
///
/// GET /users/me
pub async fn get_me(RequireUser(user): RequireUser) -> Json<UserResponse> {
    Json(UserResponse::from_user(&user))
}

/// List users, newest first
///
/// GET /users?limit=
pub async fn list_users(
    State(state): State<AppState>,
    _user: RequireUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state
        .user_service
        .list(query.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .await?;

    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Get a user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _user: RequireUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.user_service.get(&UserId::new(id)).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Update the current user's email and/or username
///
/// PUT /users/me
pub async fn update_me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state
        .user_service
        .update_profile(
            user.id(),
            UpdateProfileRequest {
                email: request.email,
                username: request.username,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&updated)))
}

/// Change the current user's password
///
/// PUT /users/me/password
///
/// A wrong current password is a bad request here, not an authentication
/// failure: the caller already holds a valid token.
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<ChangePasswordBody>,
) -> Result<Json<UserResponse>, ApiError> {
    if request.new_password != request.confirm_password {
        return Err(ApiError::bad_request("Passwords do not match"));
    }

    let updated = state
        .user_service
        .change_password(
            user.id(),
            ChangePasswordRequest {
                current_password: request.current_password,
                new_password: request.new_password,
            },
        )
        .await
        .map_err(|e| match e {
            DomainError::InvalidCredentials { message } => ApiError::bad_request(message),
            other => ApiError::from(other),
        })?;

    Ok(Json(UserResponse::from_user(&updated)))
}
