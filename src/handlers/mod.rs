//! HTTP handlers for students and courses.

pub mod courses;
pub mod students;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Decode a JSON object body into a request type. Extractor rejections and wrong
/// shapes are a bad request, except an oversized body.
pub(crate) fn body_to<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;
    if !value.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::StudentRequest;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("96").unwrap(), 96);
        assert!(matches!(parse_id("abc"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn body_shapes() {
        let req: StudentRequest = body_to(Ok(Json(serde_json::json!({"firstName": "Jill", "gsmNumber": null})))).unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Jill"));
        assert!(req.gsm_number.is_none());
        assert!(body_to::<StudentRequest>(Ok(Json(serde_json::json!([1, 2])))).is_err());
        assert!(body_to::<StudentRequest>(Ok(Json(serde_json::json!({"firstName": 5})))).is_err());
    }
}
