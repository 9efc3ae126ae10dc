use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::faqs;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .merge(faqs::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
