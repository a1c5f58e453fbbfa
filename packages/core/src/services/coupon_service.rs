//! Coupon management for a single course
//!
//! Input is normalized and validated locally so obviously bad requests never
//! reach the API. After every successful write the course is fetched again and
//! the fresh coupon list returned, so callers never merge server state by hand.

use crate::client::{ApiError, CourseApi};
use crate::models::{Coupon, CouponInput, CouponPatch, CouponStatus};
use crate::services::ServiceError;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct CouponService {
    api: Arc<dyn CourseApi>,
}

impl CouponService {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self, course_id: &str) -> Result<Vec<Coupon>, ServiceError> {
        let course = self.api.get_course(course_id).await?;
        Ok(course.coupons)
    }

    /// Every coupon paired with its status at `now`
    pub async fn statuses(
        &self,
        course_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<(Coupon, CouponStatus)>, ServiceError> {
        let coupons = self.list(course_id).await?;
        Ok(coupons
            .into_iter()
            .map(|coupon| {
                let status = coupon.status_at(now);
                (coupon, status)
            })
            .collect())
    }

    /// Create a coupon; the code is upper-cased first
    pub async fn create(
        &self,
        course_id: &str,
        input: CouponInput,
    ) -> Result<Vec<Coupon>, ServiceError> {
        let input = input.normalized()?;
        let created = self.api.create_coupon(course_id, input).await?;
        tracing::info!("Created coupon {} ({}) on course {}", created.code, created.id, course_id);
        self.list(course_id).await
    }

    /// Apply a partial update
    ///
    /// The merged validity window is checked against the current coupon, so
    /// moving only one bound still cannot invert the window.
    pub async fn update(
        &self,
        course_id: &str,
        coupon_id: &str,
        patch: CouponPatch,
    ) -> Result<Vec<Coupon>, ServiceError> {
        let patch = patch.normalized()?;
        let coupons = self.list(course_id).await?;
        let current = coupons
            .iter()
            .find(|coupon| coupon.id == coupon_id)
            .ok_or_else(|| ApiError::not_found("coupon", coupon_id))?;
        if patch.is_empty() {
            tracing::debug!("Empty coupon patch for {}, nothing to send", coupon_id);
            return Ok(coupons);
        }
        patch.applied_to(current)?;

        self.api.update_coupon(course_id, coupon_id, patch).await?;
        tracing::info!("Updated coupon {} on course {}", coupon_id, course_id);
        self.list(course_id).await
    }

    pub async fn delete(&self, course_id: &str, coupon_id: &str) -> Result<Vec<Coupon>, ServiceError> {
        self.api.delete_coupon(course_id, coupon_id).await?;
        tracing::info!("Deleted coupon {} from course {}", coupon_id, course_id);
        self.list(course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryCourseApi;
    use crate::models::{Course, ValidationError};
    use chrono::Duration;

    fn service() -> (Arc<InMemoryCourseApi>, CouponService) {
        let api = Arc::new(InMemoryCourseApi::new().with_course(Course::new("c-1", "Rust")));
        (api.clone(), CouponService::new(api))
    }

    #[tokio::test]
    async fn test_create_normalizes_code() {
        let (_, service) = service();
        let coupons = service
            .create("c-1", CouponInput::new("  launch50 ", 50, 10))
            .await
            .unwrap();

        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].code, "LAUNCH50");
        assert_eq!(coupons[0].used_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_api() {
        let (api, service) = service();
        // A queued failure would surface if the API were called
        api.fail_next(ApiError::transport("should not be called"));

        let err = service
            .create("c-1", CouponInput::new("ZERO", 0, 10))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create("c-1", CouponInput::new("", 10, 10))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        // Failure is still pending, so no request was made
        assert!(service.list("c-1").await.is_err());
    }

    #[tokio::test]
    async fn test_update_checks_merged_window() {
        let (_, service) = service();
        let now = Utc::now();
        let coupons = service
            .create(
                "c-1",
                CouponInput::new("WINDOW", 10, 5).with_window(Some(now), Some(now + Duration::days(7))),
            )
            .await
            .unwrap();
        let id = coupons[0].id.clone();

        let err = service
            .update("c-1", &id, CouponPatch::new().with_valid_until(Some(now - Duration::days(1))))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::InvalidWindow(_))));

        let coupons = service
            .update("c-1", &id, CouponPatch::new().with_discount(25))
            .await
            .unwrap();
        assert_eq!(coupons[0].discount, 25);
    }

    #[tokio::test]
    async fn test_update_unknown_coupon() {
        let (_, service) = service();
        let err = service
            .update("c-1", "missing", CouponPatch::new().with_active(false))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_patch_on_unknown_coupon_is_not_found() {
        let (_, service) = service();
        let err = service
            .update("c-1", "no-such-coupon", CouponPatch::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_returns_fresh_list() {
        let (_, service) = service();
        service.create("c-1", CouponInput::new("A", 10, 1)).await.unwrap();
        let coupons = service.create("c-1", CouponInput::new("B", 20, 1)).await.unwrap();
        let first = coupons.iter().find(|c| c.code == "A").unwrap().id.clone();

        let coupons = service.delete("c-1", &first).await.unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].code, "B");
    }

    #[tokio::test]
    async fn test_statuses() {
        let (_, service) = service();
        service
            .create("c-1", CouponInput::new("OFF", 10, 5).inactive())
            .await
            .unwrap();

        let statuses = service.statuses("c-1", Utc::now()).await.unwrap();
        assert_eq!(statuses[0].1, CouponStatus::Inactive);
    }
}
