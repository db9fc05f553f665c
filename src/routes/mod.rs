pub mod health;
pub mod posting;
pub mod telegram;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    let posting_api = Router::new()
        .route("/api/postings", post(posting::create_posting))
        .route("/api/postings/pending", get(posting::list_pending))
        .route("/api/postings/stats", get(posting::get_stats))
        .route("/api/postings/:id/approve", post(posting::approve_posting))
        .route("/api/postings/:id/reject", post(posting::reject_posting))
        .route("/api/postings/:id/archive", post(posting::archive_posting))
        .layer(
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/api/webhook/telegram", post(telegram::telegram_webhook))
        .merge(posting_api)
        .with_state(state)
}
