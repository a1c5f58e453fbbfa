//! Course metadata CRUD
//!
//! Thin layer over [`CourseApi`] that validates the metadata form before
//! anything is sent. The curriculum itself is edited through
//! [`crate::editor::CurriculumEditor`], never here.

use crate::client::CourseApi;
use crate::models::{Course, CourseInput, CoursePatch};
use crate::services::ServiceError;
use std::sync::Arc;

pub struct CourseService {
    api: Arc<dyn CourseApi>,
}

impl CourseService {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    pub async fn get(&self, course_id: &str) -> Result<Course, ServiceError> {
        Ok(self.api.get_course(course_id).await?)
    }

    pub async fn create(&self, input: CourseInput) -> Result<Course, ServiceError> {
        let input = input.normalized()?;
        let course = self.api.create_course(input).await?;
        tracing::info!("Created course {} ({})", course.title, course.id);
        Ok(course)
    }

    /// Apply a partial update; an empty patch just returns the current record
    pub async fn update(&self, course_id: &str, patch: CoursePatch) -> Result<Course, ServiceError> {
        let patch = patch.normalized()?;
        if patch.is_empty() {
            tracing::debug!("Empty course patch for {}, nothing to send", course_id);
            return self.get(course_id).await;
        }
        let course = self.api.update_course(course_id, patch).await?;
        tracing::info!("Updated course {}", course_id);
        Ok(course)
    }

    pub async fn delete(&self, course_id: &str) -> Result<(), ServiceError> {
        self.api.delete_course(course_id).await?;
        tracing::info!("Deleted course {}", course_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryCourseApi;
    use crate::models::{CourseStatus, ValidationError};

    fn service() -> CourseService {
        CourseService::new(Arc::new(InMemoryCourseApi::new()))
    }

    #[tokio::test]
    async fn test_create_trims_title() {
        let service = service();
        let course = service
            .create(CourseInput::new("  Async Rust  ").with_price(49.0))
            .await
            .unwrap();
        assert_eq!(course.title, "Async Rust");
        assert_eq!(course.status, CourseStatus::Draft);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let err = service()
            .create(CourseInput::new("Rust").with_price(-5.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let course = service.create(CourseInput::new("Rust")).await.unwrap();

        let updated = service
            .update(&course.id, CoursePatch::new().with_status(CourseStatus::Published))
            .await
            .unwrap();
        assert_eq!(updated.status, CourseStatus::Published);

        let unchanged = service.update(&course.id, CoursePatch::new()).await.unwrap();
        assert_eq!(unchanged.status, CourseStatus::Published);

        service.delete(&course.id).await.unwrap();
        assert!(service.get(&course.id).await.unwrap_err().is_not_found());
    }
}
