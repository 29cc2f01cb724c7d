//! Router assembly: public routes, gated routes, and shared state.

use crate::auth::{api as auth_api, auth_middleware, JwtHandler, UserStore};
use crate::middleware::request_logging;
use crate::news::{api as news_api, PostStore};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<UserStore>,
    pub post_store: Arc<PostStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AppState {
    pub fn new(
        user_store: Arc<UserStore>,
        post_store: Arc<PostStore>,
        jwt_handler: Arc<JwtHandler>,
    ) -> Self {
        Self {
            user_store,
            post_store,
            jwt_handler,
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/login", post(auth_api::login))
        .route("/users/token-is-valid", post(auth_api::token_is_valid))
        .route("/all-news-posts", get(news_api::all_published_posts))
        .route("/fetch-post/:id", post(news_api::fetch_post))
        .with_state(state.clone());

    // Everything behind the auth gate. Registration is gated too: only an
    // existing session can create accounts.
    let gated_routes = Router::new()
        .route("/register", post(auth_api::register))
        .route("/fetch-users", get(auth_api::fetch_users))
        .route("/fetch-user", get(auth_api::fetch_own_record))
        .route("/fetch-user/:user_id", get(auth_api::fetch_user_by_id))
        .route("/delete-user/:user_id", delete(auth_api::delete_user))
        .route("/update-user-record", post(auth_api::update_user_record))
        .route("/create-news-post", post(news_api::create_post))
        .route("/news-posts", post(news_api::list_posts))
        .route("/delete-post", post(news_api::delete_post))
        .route("/publish-post", post(news_api::publish_post))
        .route("/update-news-post", put(news_api::update_post))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(gated_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
