use axum::{Router, routing::get};
use util::state::AppState;

mod common;
mod delete;
mod get;
mod post;
mod put;

pub use delete::delete_student;
pub use get::{get_frequency, get_pickups, get_student, list_students};
pub use post::create_student;
pub use put::{set_pickups, update_student};

pub fn student_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{student_id}/pickups", get(get_pickups).put(set_pickups))
        .route("/{student_id}/frequency", get(get_frequency))
        .with_state(app_state)
}
