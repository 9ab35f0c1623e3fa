//! Course routes under `/courses`.

use crate::handlers::courses::{create, list, read, read_with_students};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn course_routes(state: AppState) -> Router {
    Router::new()
        .route("/courses", get(list).post(create))
        .route("/courses/:id", get(read))
        .route("/courses/:id/students", get(read_with_students))
        .with_state(state)
}
