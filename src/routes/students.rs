//! Student routes under `/students`.

use crate::handlers::students::{
    add_course, create, delete as delete_handler, list, patch, read, read_with_courses, remove_course, replace,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get},
    Router,
};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list).post(create))
        .route(
            "/students/:id",
            get(read).put(replace).patch(patch).delete(delete_handler),
        )
        .route("/students/:id/courses", get(read_with_courses).post(add_course))
        .route("/students/:id/courses/:course_id", delete(remove_course))
        .with_state(state)
}
