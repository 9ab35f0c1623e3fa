//! Student operations: existence checks, validation, and projection.

use crate::domain::{Enrollment, Student};
use crate::error::AppError;
use crate::request::{CourseRequest, StudentRequest};
use crate::response::{Created, Page, StudentResponse, StudentWithCoursesResponse};
use crate::service::RequestValidator;
use crate::store::{PageRequest, Store};

pub struct StudentService;

impl StudentService {
    /// All students in id order, one page at a time.
    pub async fn list(store: &dyn Store, page: PageRequest) -> Result<Page<StudentResponse>, AppError> {
        let (rows, total) = store.list_students(page).await?;
        let content = rows.iter().map(StudentResponse::from).collect();
        Ok(Page::new(content, page.page, page.size, total))
    }

    pub async fn get(store: &dyn Store, id: i64) -> Result<StudentResponse, AppError> {
        let student = Self::require(store, id).await?;
        Ok((&student).into())
    }

    pub async fn get_with_courses(store: &dyn Store, id: i64) -> Result<StudentWithCoursesResponse, AppError> {
        let student = Self::require(store, id).await?;
        let courses = store.courses_of_student(id).await?;
        Ok(StudentWithCoursesResponse::new(&student, &courses))
    }

    /// Validate and insert. Nothing reaches the store when validation fails.
    pub async fn create(store: &dyn Store, req: &StudentRequest) -> Result<Created, AppError> {
        let data = RequestValidator::validate_student(req)?;
        let student = store.insert_student(&data).await?;
        tracing::info!(student_id = student.id, "student created");
        Ok(Created {
            id: student.id,
            location: format!("/students/{}", student.id),
        })
    }

    /// Overwrite every mutable field; an omitted phone number clears it.
    pub async fn replace(store: &dyn Store, id: i64, req: &StudentRequest) -> Result<StudentResponse, AppError> {
        let data = RequestValidator::validate_student(req)?;
        let mut student = Self::require(store, id).await?;
        student.data = data;
        let saved = store
            .save_student(&student)
            .await?
            .ok_or_else(|| AppError::student_not_found(id))?;
        tracing::info!(student_id = id, "student replaced");
        Ok((&saved).into())
    }

    /// Overwrite only the fields present in the request.
    pub async fn patch(store: &dyn Store, id: i64, req: &StudentRequest) -> Result<StudentResponse, AppError> {
        let mut student = Self::require(store, id).await?;
        let patch = RequestValidator::validate_student_patch(req)?;
        patch.apply_to(&mut student.data);
        let saved = store
            .save_student(&student)
            .await?
            .ok_or_else(|| AppError::student_not_found(id))?;
        tracing::info!(student_id = id, "student patched");
        Ok((&saved).into())
    }

    /// NotFound only when the student is absent at the initial check.
    pub async fn delete(store: &dyn Store, id: i64) -> Result<(), AppError> {
        Self::require(store, id).await?;
        if !store.delete_student(id).await? {
            tracing::warn!(student_id = id, "student already gone at delete");
        } else {
            tracing::info!(student_id = id, "student deleted");
        }
        Ok(())
    }

    /// Enroll the student in an existing course. Re-adding an enrolled course is a no-op.
    pub async fn add_course(store: &dyn Store, student_id: i64, req: &CourseRequest) -> Result<(), AppError> {
        let course_id = RequestValidator::validate_course_ref(req)?;
        Self::require(store, student_id).await?;
        store
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::course_not_found(course_id))?;
        let added = store.enroll(Enrollment::new(student_id, course_id)).await?;
        tracing::info!(student_id, course_id, added, "course added to student");
        Ok(())
    }

    /// Drop the enrollment if present; both ids must exist.
    pub async fn remove_course(store: &dyn Store, student_id: i64, course_id: i64) -> Result<(), AppError> {
        Self::require(store, student_id).await?;
        store
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::course_not_found(course_id))?;
        let removed = store.unenroll(Enrollment::new(student_id, course_id)).await?;
        tracing::info!(student_id, course_id, removed, "course removed from student");
        Ok(())
    }

    async fn require(store: &dyn Store, id: i64) -> Result<Student, AppError> {
        store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::student_not_found(id))
    }
}
