//! Route groups and the assembled application router.

mod common;
mod courses;
mod students;

pub use common::common_routes;
pub use courses::course_routes;
pub use students::student_routes;

use crate::openapi::openapi_routes;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Every route group behind the body limit, request tracing and permissive CORS.
/// The body limit must be outermost: its response body has no `Default`, which the inner layers need.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state.clone()))
        .merge(course_routes(state))
        .merge(openapi_routes())
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
