//! Collaborator Services
//!
//! - `CourseService` - course metadata create/read/update/delete
//! - `CouponService` - coupon management with status derivation
//!
//! Both validate input locally and then delegate to a shared [`CourseApi`]
//! implementation.
//!
//! [`CourseApi`]: crate::client::CourseApi

pub mod coupon_service;
pub mod course_service;
pub mod error;

pub use coupon_service::CouponService;
pub use course_service::CourseService;
pub use error::ServiceError;
