//! Course API Client
//!
//! The `CourseApi` trait is the seam between the editor/services and whatever
//! actually stores courses. Two implementations ship with the crate:
//!
//! - [`HttpCourseApi`] - JSON over HTTP against the remote course API
//! - [`InMemoryCourseApi`] - an in-process stand-in used by tests and dry runs
//!
//! # Design Decisions
//!
//! 1. **Whole-object writes**: the curriculum is always replaced in full;
//!    there is no incremental update call
//! 2. **No retries**: every failure is returned to the caller, retry is a
//!    user action
//! 3. **Async-first**: all methods are async so HTTP and in-memory backends
//!    share one interface

pub mod error;
pub mod http;
pub mod memory;

pub use error::ApiError;
pub use http::HttpCourseApi;
pub use memory::InMemoryCourseApi;

use crate::models::{Coupon, CouponInput, CouponPatch, Course, CourseInput, CoursePatch, Curriculum};
use async_trait::async_trait;

/// Operations the remote course API exposes
///
/// Implementations must be `Send + Sync` so a single client can be shared by
/// the editor and the collaborator services.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// Fetch a course with its curriculum and coupons
    async fn get_course(&self, course_id: &str) -> Result<Course, ApiError>;

    /// Atomically replace a course's entire curriculum
    async fn save_curriculum(&self, course_id: &str, curriculum: &Curriculum)
        -> Result<(), ApiError>;

    async fn create_course(&self, input: CourseInput) -> Result<Course, ApiError>;

    async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Course, ApiError>;

    async fn delete_course(&self, course_id: &str) -> Result<(), ApiError>;

    async fn create_coupon(&self, course_id: &str, input: CouponInput) -> Result<Coupon, ApiError>;

    async fn update_coupon(
        &self,
        course_id: &str,
        coupon_id: &str,
        patch: CouponPatch,
    ) -> Result<Coupon, ApiError>;

    async fn delete_coupon(&self, course_id: &str, coupon_id: &str) -> Result<(), ApiError>;
}
