use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news/search", get(handlers::search_news))
        .route("/api/news/health", get(handlers::health))
        .route("/api/news/cache/stats", get(handlers::cache_stats))
        .route("/api/news/cache", delete(handlers::clear_cache))
        .layer(cors)
        .with_state(Arc::new(state))
}
