//! Shared integration-test harness: an in-memory app instance plus the
//! database handle so tests can seed data through the model layer.

use axum::Router;
use sea_orm::DatabaseConnection;
use util::state::AppState;

use db::test_utils::{init_test_env, setup_test_db};

/// Fresh app over a fresh in-memory database. Returns the router (clone it
/// per request) and the connection for seeding.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    init_test_env();
    let db = setup_test_db().await;
    let state = AppState::new(db.clone());
    let router = Router::new().nest("/api", api::routes::routes(state));
    (router, db)
}

/// `Authorization` header value for a test caller.
pub fn auth_header(admin: bool) -> String {
    let (token, _) = api::auth::generate_jwt(1, admin);
    format!("Bearer {token}")
}
