//! Request bodies. Every field is optional on the wire; required-ness is
//! checked by `RequestValidator` so all violations can be reported at once.

use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    /// One of `M`, `V`.
    pub gender: Option<String>,
    pub gsm_number: Option<String>,
}

/// Reference to an existing course.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CourseRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewCourseRequest {
    pub name: Option<String>,
    pub phase: Option<i32>,
}
