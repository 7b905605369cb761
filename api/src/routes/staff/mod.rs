use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;

mod common;
mod get;
mod post;

pub use get::list_staff;
pub use post::create_staff;

pub fn staff_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_staff))
        .route("/", post(create_staff).route_layer(from_fn(allow_admin)))
        .with_state(app_state)
}
