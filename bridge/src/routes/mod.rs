pub mod api;

use std::sync::Arc;

use axum::Router;

use crate::middleware::{cors_layer, security_headers};
use crate::state::AppState;

/// Assemble the full application: API routes, CORS and security headers
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    api::create_api_router()
        .with_state(state)
        .layer(cors)
        .layer(security_headers())
}
