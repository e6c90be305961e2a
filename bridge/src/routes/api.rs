use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, synthesize};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// CORS and security headers are applied in `routes::create_app`
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/synthesize", post(synthesize::synthesize_handler))
        .route("/health", get(api::health_check))
        .layer(TraceLayer::new_for_http())
}
