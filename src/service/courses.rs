//! Course operations.

use crate::error::AppError;
use crate::request::NewCourseRequest;
use crate::response::{CourseResponse, CourseWithStudentsResponse, Created};
use crate::service::RequestValidator;
use crate::store::Store;

pub struct CourseService;

impl CourseService {
    pub async fn create(store: &dyn Store, req: &NewCourseRequest) -> Result<Created, AppError> {
        let new_course = RequestValidator::validate_new_course(req)?;
        let course = store.insert_course(&new_course).await?;
        tracing::info!(course_id = course.id, name = %course.name, "course created");
        Ok(Created {
            id: course.id,
            location: format!("/courses/{}", course.id),
        })
    }

    pub async fn list(store: &dyn Store) -> Result<Vec<CourseResponse>, AppError> {
        let courses = store.list_courses().await?;
        Ok(courses.iter().map(CourseResponse::from).collect())
    }

    pub async fn get(store: &dyn Store, id: i64) -> Result<CourseResponse, AppError> {
        let course = store
            .find_course(id)
            .await?
            .ok_or_else(|| AppError::course_not_found(id))?;
        Ok((&course).into())
    }

    /// Lowest id among exact name matches.
    pub async fn find_by_name(store: &dyn Store, name: &str) -> Result<CourseResponse, AppError> {
        let course = store
            .find_course_by_name(name)
            .await?
            .ok_or_else(|| AppError::course_not_found(name))?;
        Ok((&course).into())
    }

    /// The course and its roster in enrollment order.
    pub async fn get_with_students(store: &dyn Store, id: i64) -> Result<CourseWithStudentsResponse, AppError> {
        let course = store
            .find_course(id)
            .await?
            .ok_or_else(|| AppError::course_not_found(id))?;
        let students = store.students_of_course(id).await?;
        Ok(CourseWithStudentsResponse::new(&course, &students))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn course(name: &str, phase: i32) -> NewCourseRequest {
        NewCourseRequest {
            name: Some(name.into()),
            phase: Some(phase),
        }
    }

    #[tokio::test]
    async fn create_then_lookup() {
        let store = MemoryStore::new();
        let created = CourseService::create(&store, &course("iOS", 3)).await.unwrap();
        assert_eq!(created.location, format!("/courses/{}", created.id));
        let view = CourseService::get(&store, created.id).await.unwrap();
        assert_eq!(view, CourseResponse { id: created.id, name: "iOS".into(), phase: 3 });
        assert_eq!(CourseService::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_name_picks_lowest_id() {
        let store = MemoryStore::new();
        let first = CourseService::create(&store, &course("Android", 2)).await.unwrap();
        CourseService::create(&store, &course("Android", 4)).await.unwrap();
        let found = CourseService::find_by_name(&store, "Android").await.unwrap();
        assert_eq!(found.id, first.id);
        assert!(matches!(
            CourseService::find_by_name(&store, "----").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(CourseService::get(&store, 5).await, Err(AppError::NotFound { .. })));
        assert!(matches!(
            CourseService::get_with_students(&store, 5).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
