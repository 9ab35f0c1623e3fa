//! Read-only API views built from domain entities, and the page envelope.

use crate::domain::{Course, Student};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    /// `"<lastName> <firstName>"`
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        let data = &student.data;
        Self {
            id: student.id,
            name: format!("{} {}", data.last_name, data.first_name),
            birth_date: data.birth_date,
            gender: data.gender.as_code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub phase: i32,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            phase: course.phase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentWithCoursesResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub courses: Vec<CourseResponse>,
}

impl StudentWithCoursesResponse {
    /// `courses` in the student's enrollment order.
    pub fn new(student: &Student, courses: &[Course]) -> Self {
        Self {
            student: student.into(),
            courses: courses.iter().map(CourseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseWithStudentsResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub students: Vec<StudentResponse>,
}

impl CourseWithStudentsResponse {
    pub fn new(course: &Course, students: &[Student]) -> Self {
        Self {
            course: course.into(),
            students: students.iter().map(StudentResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size))
        };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

/// Id and canonical location of a newly created resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: i64,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, StudentData};

    fn jill() -> Student {
        Student {
            id: 96,
            data: StudentData {
                first_name: "Jill".into(),
                last_name: "Jackson".into(),
                birth_date: NaiveDate::from_ymd_opt(1995, 4, 17).unwrap(),
                gender: Gender::V,
                gsm_number: Some("77445521".into()),
            },
        }
    }

    #[test]
    fn student_projection_json() {
        let json = serde_json::to_value(StudentResponse::from(&jill())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 96,
                "name": "Jackson Jill",
                "birthDate": "1995-04-17",
                "gender": "V"
            })
        );
    }

    #[test]
    fn courses_are_nested_in_given_order() {
        let courses = vec![
            Course { id: 2, name: "iOS".into(), phase: 3 },
            Course { id: 1, name: "Backend Programming".into(), phase: 3 },
        ];
        let json = serde_json::to_value(StudentWithCoursesResponse::new(&jill(), &courses)).unwrap();
        assert_eq!(json["name"], "Jackson Jill");
        assert_eq!(json["courses"][0], serde_json::json!({"id": 2, "name": "iOS", "phase": 3}));
        assert_eq!(json["courses"][1]["name"], "Backend Programming");
    }

    #[test]
    fn page_counts() {
        let page = Page::new(vec![1, 2], 0, 2, 5);
        assert_eq!(page.total_pages, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 5);
        assert_eq!(Page::<i32>::new(vec![], 0, 20, 0).total_pages, 0);
    }
}
