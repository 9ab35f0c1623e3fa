//! Course handlers: list (optionally by name), read, roster, create.

use crate::error::{AppError, ErrorBody};
use crate::handlers::{body_to, parse_id};
use crate::request::NewCourseRequest;
use crate::response::{CourseResponse, CourseWithStudentsResponse};
use crate::service::CourseService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/courses",
    tag = "courses",
    summary = "Get all courses, or the course with the given name",
    params(("name" = Option<String>, Query, description = "Exact name; lowest id wins on duplicates")),
    responses((status = 200, body = Vec<CourseResponse>))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.as_ref();
    let courses = match params.get("name") {
        Some(name) => match CourseService::find_by_name(store, name).await {
            Ok(course) => vec![course],
            Err(AppError::NotFound { .. }) => Vec::new(),
            Err(e) => return Err(e),
        },
        None => CourseService::list(store).await?,
    };
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = "courses",
    summary = "Get a course by id",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = CourseResponse),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(CourseService::get(state.store.as_ref(), id).await?))
}

#[utoipa::path(
    get,
    path = "/courses/{id}/students",
    tag = "courses",
    summary = "Get a course and its enrolled students",
    params(("id" = i64, Path)),
    responses(
        (status = 200, body = CourseWithStudentsResponse),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn read_with_students(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(CourseService::get_with_students(state.store.as_ref(), id).await?))
}

#[utoipa::path(
    post,
    path = "/courses",
    tag = "courses",
    summary = "Create a course",
    request_body = NewCourseRequest,
    responses(
        (status = 201, description = "Created; Location points at the new course"),
        (status = 400, body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req: NewCourseRequest = body_to(body)?;
    let created = CourseService::create(state.store.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, [(header::LOCATION, created.location)]))
}
