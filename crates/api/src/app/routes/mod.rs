use axum::{
    routing::{get, post},
    Router,
};

pub mod analytics;
pub mod auth;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/auth", post(auth::issue_token))
        .route("/validate", get(auth::validate_token))
        .route("/analytics", post(analytics::item_analytics))
}
