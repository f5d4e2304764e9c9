//! News tracking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::news::{NewNewsItem, NewsCategory, NewsFilter, NewsId, NewsItem, NewsStatus};
use crate::infrastructure::news::NewsStats;

/// Create the news router
pub fn create_news_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/user", get(user_news))
        .route("/public", get(public_news))
        .route("/stats", get(stats))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/favorite", patch(toggle_favorite))
        .route("/{id}/visibility", patch(set_visibility))
        .route("/{id}/category", patch(update_category))
        .route("/{id}/note", patch(update_note))
}

/// News creation request
#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub source: String,
    pub title: String,
    pub summary: String,
    pub link: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

/// Listing query parameters; enum values arrive as lowercase strings
#[derive(Debug, Default, Deserialize)]
pub struct NewsListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub is_favorite: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl NewsListQuery {
    fn into_filter(self) -> Result<NewsFilter, ApiError> {
        let status = self
            .status
            .as_deref()
            .map(NewsStatus::parse)
            .transpose()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
        let category = self
            .category
            .as_deref()
            .map(NewsCategory::parse)
            .transpose()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(NewsFilter {
            status,
            category,
            is_favorite: self.is_favorite,
            date_from: self.date_from,
            date_to: self.date_to,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Visibility change request
#[derive(Debug, Deserialize)]
pub struct SetVisibilityRequest {
    pub is_public: bool,
}

/// Category change request
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category: String,
}

/// Note change request; a null note clears it
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub note: Option<String>,
}

/// Track a new news item
///
/// POST /api/news
pub async fn create_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    let category = request
        .category
        .as_deref()
        .map(NewsCategory::parse)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?
        .unwrap_or_default();

    let item = state
        .news_service
        .create(NewNewsItem {
            source: request.source,
            title: request.title,
            summary: request.summary,
            link: request.link,
            image_url: request.image_url,
            category,
            user_id: user.id().clone(),
            is_public: request.is_public,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List the caller's items plus public ones
///
/// GET /api/news/user
pub async fn user_news(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let filter = query.into_filter()?;
    let items = state.news_service.user_news(user.id(), &filter).await?;

    Ok(Json(items))
}

/// List public items, no authentication required
///
/// GET /api/news/public
pub async fn public_news(
    State(state): State<AppState>,
    Query(query): Query<NewsListQuery>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let filter = query.into_filter()?;
    let items = state.news_service.public_news(&filter).await?;

    Ok(Json(items))
}

/// Reading statistics for the caller
///
/// GET /api/news/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<NewsStats>, ApiError> {
    let stats = state.news_service.stats(user.id()).await?;

    Ok(Json(stats))
}

/// Change an item's reading status
///
/// PATCH /api/news/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    let status =
        NewsStatus::parse(&request.status).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let item = state
        .news_service
        .update_status(&NewsId::new(id), user.id(), status)
        .await?;

    Ok(Json(item))
}

/// Toggle an item's favorite flag
///
/// PATCH /api/news/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .news_service
        .toggle_favorite(&NewsId::new(id), user.id())
        .await?;

    Ok(Json(item))
}

/// Change whether an item is publicly visible
///
/// PATCH /api/news/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<SetVisibilityRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .news_service
        .set_visibility(&NewsId::new(id), user.id(), request.is_public)
        .await?;

    Ok(Json(item))
}

/// Change an item's category
///
/// PATCH /api/news/{id}/category
pub async fn update_category(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    let category =
        NewsCategory::parse(&request.category).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let item = state
        .news_service
        .update_category(&NewsId::new(id), user.id(), category)
        .await?;

    Ok(Json(item))
}

/// Set or clear the owner's note on an item
///
/// PATCH /api/news/{id}/note
pub async fn update_note(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state
        .news_service
        .update_personal_note(&NewsId::new(id), user.id(), request.note.as_deref())
        .await?;

    Ok(Json(item))
}
