//! OpenAPI document for every student and course route.

use crate::error::{ErrorBody, ErrorDetail, FieldViolation};
use crate::handlers::{courses, students};
use crate::request::{CourseRequest, NewCourseRequest, StudentRequest};
use crate::response::{CourseResponse, CourseWithStudentsResponse, StudentResponse, StudentWithCoursesResponse};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Enrollment API", description = "Students, courses, and enrollments"),
    paths(
        students::list,
        students::read,
        students::read_with_courses,
        students::create,
        students::replace,
        students::patch,
        students::delete,
        students::add_course,
        students::remove_course,
        courses::list,
        courses::read,
        courses::read_with_students,
        courses::create,
    ),
    components(schemas(
        StudentRequest,
        CourseRequest,
        NewCourseRequest,
        StudentResponse,
        StudentWithCoursesResponse,
        CourseResponse,
        CourseWithStudentsResponse,
        ErrorBody,
        ErrorDetail,
        FieldViolation,
    )),
    tags(
        (name = "students", description = "Student records and their enrollments"),
        (name = "courses", description = "Courses and their rosters"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /api-docs/openapi.json
pub fn openapi_routes() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
