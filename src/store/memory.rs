//! In-memory store. Ids are assigned from per-table counters starting at 1.

use super::{CourseStore, EnrollmentStore, PageRequest, Store, StudentStore};
use crate::domain::{Course, Enrollment, EnrollmentIndex, NewCourse, Student, StudentData};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    students: BTreeMap<i64, StudentData>,
    courses: BTreeMap<i64, Course>,
    enrollments: EnrollmentIndex,
    last_student_id: i64,
    last_course_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, data: &StudentData) -> Result<Student, AppError> {
        let mut guard = self.data.write().await;
        guard.last_student_id += 1;
        let id = guard.last_student_id;
        guard.students.insert(id, data.clone());
        Ok(Student {
            id,
            data: data.clone(),
        })
    }

    async fn save_student(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let mut guard = self.data.write().await;
        match guard.students.get_mut(&student.id) {
            Some(slot) => {
                *slot = student.data.clone();
                Ok(Some(student.clone()))
            }
            None => Ok(None),
        }
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let guard = self.data.read().await;
        Ok(guard.students.get(&id).map(|data| Student {
            id,
            data: data.clone(),
        }))
    }

    async fn list_students(&self, page: PageRequest) -> Result<(Vec<Student>, u64), AppError> {
        let guard = self.data.read().await;
        let total = guard.students.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let rows = guard
            .students
            .iter()
            .skip(offset)
            .take(page.size as usize)
            .map(|(id, data)| Student {
                id: *id,
                data: data.clone(),
            })
            .collect();
        Ok((rows, total))
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        let mut guard = self.data.write().await;
        let removed = guard.students.remove(&id).is_some();
        if removed {
            guard.enrollments.remove_student(id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let mut guard = self.data.write().await;
        guard.last_course_id += 1;
        let course = Course {
            id: guard.last_course_id,
            name: course.name.clone(),
            phase: course.phase,
        };
        guard.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self.data.read().await.courses.get(&id).cloned())
    }

    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>, AppError> {
        let guard = self.data.read().await;
        Ok(guard.courses.values().find(|c| c.name == name).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.data.read().await.courses.values().cloned().collect())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn enroll(&self, enrollment: Enrollment) -> Result<bool, AppError> {
        let mut guard = self.data.write().await;
        if !guard.students.contains_key(&enrollment.student_id) {
            return Err(AppError::student_not_found(enrollment.student_id));
        }
        if !guard.courses.contains_key(&enrollment.course_id) {
            return Err(AppError::course_not_found(enrollment.course_id));
        }
        Ok(guard.enrollments.add(enrollment))
    }

    async fn unenroll(&self, enrollment: Enrollment) -> Result<bool, AppError> {
        Ok(self.data.write().await.enrollments.remove(enrollment))
    }

    async fn courses_of_student(&self, student_id: i64) -> Result<Vec<Course>, AppError> {
        let guard = self.data.read().await;
        Ok(guard
            .enrollments
            .courses_of(student_id)
            .filter_map(|id| guard.courses.get(&id).cloned())
            .collect())
    }

    async fn students_of_course(&self, course_id: i64) -> Result<Vec<Student>, AppError> {
        let guard = self.data.read().await;
        Ok(guard
            .enrollments
            .students_of(course_id)
            .filter_map(|id| {
                guard.students.get(&id).map(|data| Student {
                    id,
                    data: data.clone(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
