use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::news;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Registration and login need no token
        .nest("/auth", auth::create_auth_router())
        .nest("/users", users::create_users_router())
        .nest("/api/news", news::create_news_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
