//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → uptime probe (public)
//! - `/sessions` → session lifecycle, check-in/check-out, presence, reports
//! - `/students` → roster, authorized pickups, frequency
//! - `/staff` → staff roster (creation is admin-only)
//!
//! All groups except `/health` require a valid bearer token; the core engine
//! itself performs no role checks beyond the admin guard on staff creation.

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod common;
pub mod health;
pub mod sessions;
pub mod staff;
pub mod students;

/// Builds the complete application router mounted under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health::health_routes())
        .nest(
            "/sessions",
            sessions::session_routes(app_state.clone()).layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/students",
            students::student_routes(app_state.clone()).layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/staff",
            staff::staff_routes(app_state).layer(from_fn(allow_authenticated)),
        )
}
