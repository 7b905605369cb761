use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::response::ApiResponse;

/// Builds the `/health` route group: a single unauthenticated endpoint for
/// uptime checks and deployment probes.
pub fn health_routes() -> Router {
    Router::new().route("/", get(health_check))
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Health check passed"))
}
