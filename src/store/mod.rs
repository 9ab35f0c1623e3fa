//! Persistence traits for students, courses, and enrollments, with a
//! PostgreSQL implementation and an in-memory one for tests and local runs.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};
pub(crate) use postgres::quote_ident;

use crate::domain::{Course, Enrollment, NewCourse, Student, StudentData};
use crate::error::AppError;
use async_trait::async_trait;

/// Zero-based page of `size` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;
    pub const MAX_SIZE: u32 = 1000;

    /// Missing values fall back to page 0 and the default size; size is clamped to `1..=MAX_SIZE`.
    pub fn new(page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(Self::DEFAULT_SIZE).clamp(1, Self::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert_student(&self, data: &StudentData) -> Result<Student, AppError>;

    /// Overwrite all fields of an existing student. `None` when the row is gone.
    async fn save_student(&self, student: &Student) -> Result<Option<Student>, AppError>;

    async fn find_student(&self, id: i64) -> Result<Option<Student>, AppError>;

    /// One page in id order, plus the total number of students.
    async fn list_students(&self, page: PageRequest) -> Result<(Vec<Student>, u64), AppError>;

    /// Removes the student and its enrollments. Returns false when nothing was deleted.
    async fn delete_student(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError>;

    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Exact match on name; the lowest id wins when names repeat.
    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>, AppError>;

    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Returns false when the student was already enrolled.
    async fn enroll(&self, enrollment: Enrollment) -> Result<bool, AppError>;

    /// Returns false when there was no such enrollment.
    async fn unenroll(&self, enrollment: Enrollment) -> Result<bool, AppError>;

    /// Courses of a student in enrollment order.
    async fn courses_of_student(&self, student_id: i64) -> Result<Vec<Course>, AppError>;

    /// Students enrolled in a course in enrollment order.
    async fn students_of_course(&self, course_id: i64) -> Result<Vec<Student>, AppError>;
}

#[async_trait]
pub trait Store: StudentStore + CourseStore + EnrollmentStore {
    /// Cheap reachability check used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_defaults_and_clamps() {
        let p = PageRequest::new(None, None);
        assert_eq!(p, PageRequest { page: 0, size: 20 });
        assert_eq!(PageRequest::new(Some(2), Some(0)).size, 1);
        assert_eq!(PageRequest::new(Some(2), Some(5000)).size, 1000);
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 30);
    }
}
