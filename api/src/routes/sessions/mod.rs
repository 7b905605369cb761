use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

mod common;
mod get;
mod post;

pub use get::{get_active_session, list_attendance, list_sessions, session_report};
pub use post::{check_in, check_out, end_session, start_session};

pub fn session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_sessions).post(start_session))
        .route("/active", get(get_active_session))
        .route("/active/end", post(end_session))
        .route("/{session_id}/check-in", post(check_in))
        .route("/{session_id}/check-out", post(check_out))
        .route("/{session_id}/attendance", get(list_attendance))
        .route("/{session_id}/report", get(session_report))
        .with_state(app_state)
}
