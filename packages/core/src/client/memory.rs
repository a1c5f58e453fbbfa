//! In-process course API
//!
//! Behaves like the remote API closely enough for editor and service tests:
//! ids are generated server-side, unknown ids produce `NotFound`, duplicate
//! coupon codes are refused with a 409. A single failure can be queued with
//! [`InMemoryCourseApi::fail_next`] to exercise error paths.

use crate::client::{ApiError, CourseApi};
use crate::models::{Coupon, CouponInput, CouponPatch, Course, CourseInput, CoursePatch, Curriculum};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryCourseApi {
    courses: RwLock<HashMap<String, Course>>,
    pending_failure: Mutex<Option<ApiError>>,
    save_count: AtomicUsize,
}

impl InMemoryCourseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.get_mut().insert(course.id.clone(), course);
        self
    }

    pub async fn insert_course(&self, course: Course) {
        self.courses.write().await.insert(course.id.clone(), course);
    }

    /// Make the next call fail with `error`, whatever the operation
    pub fn fail_next(&self, error: ApiError) {
        *self
            .pending_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Number of successful `save_curriculum` calls
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Stored copy of a course, bypassing failure injection
    pub async fn snapshot(&self, course_id: &str) -> Option<Course> {
        self.courses.read().await.get(course_id).cloned()
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        let pending = self
            .pending_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match pending {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn course_not_found(course_id: &str) -> ApiError {
    ApiError::not_found("course", course_id)
}

fn coupon_not_found(coupon_id: &str) -> ApiError {
    ApiError::not_found("coupon", coupon_id)
}

fn ensure_unique_code(course: &Course, code: &str, except: Option<&str>) -> Result<(), ApiError> {
    let taken = course
        .coupons
        .iter()
        .any(|coupon| coupon.code == code && Some(coupon.id.as_str()) != except);
    if taken {
        return Err(ApiError::rejected(
            409,
            format!("Coupon code '{}' already exists", code),
        ));
    }
    Ok(())
}

#[async_trait]
impl CourseApi for InMemoryCourseApi {
    async fn get_course(&self, course_id: &str) -> Result<Course, ApiError> {
        self.take_failure()?;
        self.courses
            .read()
            .await
            .get(course_id)
            .cloned()
            .ok_or_else(|| course_not_found(course_id))
    }

    async fn save_curriculum(
        &self,
        course_id: &str,
        curriculum: &Curriculum,
    ) -> Result<(), ApiError> {
        self.take_failure()?;
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        course.curriculum = curriculum.sections().to_vec();
        course.updated_at = Some(Utc::now());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_course(&self, input: CourseInput) -> Result<Course, ApiError> {
        self.take_failure()?;
        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            subtitle: input.subtitle,
            description: input.description,
            category: input.category,
            level: input.level,
            price: input.price,
            status: input.status,
            curriculum: Vec::new(),
            coupons: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.courses
            .write()
            .await
            .insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Course, ApiError> {
        self.take_failure()?;
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        patch.apply_to(course);
        course.updated_at = Some(Utc::now());
        Ok(course.clone())
    }

    async fn delete_course(&self, course_id: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        self.courses
            .write()
            .await
            .remove(course_id)
            .map(|_| ())
            .ok_or_else(|| course_not_found(course_id))
    }

    async fn create_coupon(&self, course_id: &str, input: CouponInput) -> Result<Coupon, ApiError> {
        self.take_failure()?;
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        ensure_unique_code(course, &input.code, None)?;
        let coupon = Coupon::from_input(Uuid::new_v4().to_string(), input);
        course.coupons.push(coupon.clone());
        Ok(coupon)
    }

    async fn update_coupon(
        &self,
        course_id: &str,
        coupon_id: &str,
        patch: CouponPatch,
    ) -> Result<Coupon, ApiError> {
        self.take_failure()?;
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        if let Some(code) = &patch.code {
            ensure_unique_code(course, code, Some(coupon_id))?;
        }
        let coupon = course
            .coupons
            .iter_mut()
            .find(|coupon| coupon.id == coupon_id)
            .ok_or_else(|| coupon_not_found(coupon_id))?;
        patch.apply_to(coupon);
        Ok(coupon.clone())
    }

    async fn delete_coupon(&self, course_id: &str, coupon_id: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| course_not_found(course_id))?;
        let before = course.coupons.len();
        course.coupons.retain(|coupon| coupon.id != coupon_id);
        if course.coupons.len() == before {
            return Err(coupon_not_found(coupon_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_fetch_course() {
        let api = InMemoryCourseApi::new();
        let created = api.create_course(CourseInput::new("Rust 101")).await.unwrap();
        assert!(Uuid::parse_str(&created.id).is_ok());
        assert!(created.curriculum.is_empty());

        let fetched = api.get_course(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Rust 101");
    }

    #[test]
    fn test_with_course_seeds_store() {
        let api = InMemoryCourseApi::new().with_course(Course::new("seeded", "Seeded"));
        let course = tokio_test::block_on(api.get_course("seeded")).unwrap();
        assert_eq!(course.title, "Seeded");
        assert_eq!(api.save_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_course_is_not_found() {
        let api = InMemoryCourseApi::new();
        let err = api.get_course("missing").await.unwrap_err();
        assert_eq!(err, ApiError::not_found("course", "missing"));
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let api = InMemoryCourseApi::new();
        let course = api.create_course(CourseInput::new("c")).await.unwrap();

        api.fail_next(ApiError::transport("connection reset"));
        assert!(api.get_course(&course.id).await.is_err());
        assert!(api.get_course(&course.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_next_survives_poisoned_lock() {
        let api = InMemoryCourseApi::new();
        let course = api.create_course(CourseInput::new("c")).await.unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = api.pending_failure.lock().unwrap();
            panic!("poison the failure slot");
        }));
        assert!(poisoned.is_err());
        assert!(api.pending_failure.is_poisoned());

        api.fail_next(ApiError::transport("connection reset"));
        assert_eq!(
            api.get_course(&course.id).await.unwrap_err(),
            ApiError::transport("connection reset")
        );
        assert!(api.get_course(&course.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_save_curriculum_replaces_and_counts() {
        let api = InMemoryCourseApi::new();
        let course = api.create_course(CourseInput::new("c")).await.unwrap();

        api.save_curriculum(&course.id, &Curriculum::default())
            .await
            .unwrap();

        let stored = api.snapshot(&course.id).await.unwrap();
        assert_eq!(stored.curriculum.len(), 1);
        assert_eq!(api.save_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_coupon_code_rejected() {
        let api = InMemoryCourseApi::new();
        let course = api.create_course(CourseInput::new("c")).await.unwrap();
        api.create_coupon(&course.id, CouponInput::new("SAVE10", 10, 5))
            .await
            .unwrap();

        let err = api
            .create_coupon(&course.id, CouponInput::new("SAVE10", 20, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_coupon() {
        let api = InMemoryCourseApi::new();
        let course = api.create_course(CourseInput::new("c")).await.unwrap();
        let err = api.delete_coupon(&course.id, "nope").await.unwrap_err();
        assert_eq!(err, ApiError::not_found("coupon", "nope"));
    }
}
