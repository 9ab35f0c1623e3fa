//! Student handlers: list, read, create, replace, patch, delete, and enrollment.

use crate::error::{AppError, ErrorBody};
use crate::handlers::{body_to, parse_id};
use crate::request::{CourseRequest, StudentRequest};
use crate::response::{Page, StudentResponse, StudentWithCoursesResponse};
use crate::service::StudentService;
use crate::state::AppState;
use crate::store::PageRequest;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn page_param(params: &HashMap<String, String>, key: &str) -> Result<Option<u32>, AppError> {
    params
        .get(key)
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| AppError::BadRequest(format!("{} must be a non-negative integer", key)))
        })
        .transpose()
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    summary = "Get all students",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size, 1..=1000, default 20"),
    ),
    responses(
        (status = 200, body = Page<StudentResponse>),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(page_param(&params, "page")?, page_param(&params, "size")?);
    let page = StudentService::list(state.store.as_ref(), page).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    summary = "Get a student by id",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = StudentResponse),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::get(state.store.as_ref(), id).await?))
}

#[utoipa::path(
    get,
    path = "/students/{id}/courses",
    tag = "students",
    summary = "Get a student and the courses they are enrolled in",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = StudentWithCoursesResponse),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn read_with_courses(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(StudentService::get_with_courses(state.store.as_ref(), id).await?))
}

#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    summary = "Create a student",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Created; Location points at the new student"),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req: StudentRequest = body_to(body)?;
    let created = StudentService::create(state.store.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, created.location)]))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    summary = "Replace a student's data",
    params(("id" = i64, Path)),
    request_body = StudentRequest,
    responses(
        (status = 200, body = StudentResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let req: StudentRequest = body_to(body)?;
    Ok(Json(StudentService::replace(state.store.as_ref(), id, &req).await?))
}

#[utoipa::path(
    patch,
    path = "/students/{id}",
    tag = "students",
    summary = "Update the supplied fields of a student",
    params(("id" = i64, Path)),
    request_body = StudentRequest,
    responses(
        (status = 200, body = StudentResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn patch(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let req: StudentRequest = body_to(body)?;
    Ok(Json(StudentService::patch(state.store.as_ref(), id, &req).await?))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    summary = "Delete a student",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    StudentService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/students/{id}/courses",
    tag = "students",
    summary = "Add a course to a student",
    params(("id" = i64, Path)),
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Enrolled, or already enrolled"),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn add_course(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let req: CourseRequest = body_to(body)?;
    StudentService::add_course(state.store.as_ref(), id, &req).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/students/{id}/courses/{course_id}",
    tag = "students",
    summary = "Remove a course from a student",
    params(("id" = i64, Path), ("course_id" = i64, Path)),
    responses(
        (status = 204, description = "Removed, or was not enrolled"),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn remove_course(
    State(state): State<AppState>,
    Path((id_str, course_id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let course_id = parse_id(&course_id_str)?;
    StudentService::remove_course(state.store.as_ref(), id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
