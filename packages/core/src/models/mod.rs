//! Data Models
//!
//! This module contains the data structures shared by the editor, the API
//! client and the collaborator services:
//!
//! - `LessonNode` / `SectionNode` / `Curriculum` - the curriculum tree
//! - `Course` - course record with its raw curriculum and coupons
//! - `Coupon` - discount coupons and their derived status
//!
//! All records serialize with camelCase keys to match the course API.

mod coupon;
mod course;
mod curriculum;
mod lesson;
mod section;
mod validation;


pub use coupon::{
    normalize_code, validate_window, Coupon, CouponInput, CouponPatch, CouponStatus,
    MAX_DISCOUNT, MIN_DISCOUNT,
};
pub use course::{Course, CourseInput, CourseLevel, CoursePatch, CourseStatus};
pub use curriculum::Curriculum;
pub use lesson::{LessonBody, LessonNode, LessonType, WELCOME_LESSON_TITLE};
pub use section::{SectionNode, DEFAULT_SECTION_TITLE};
pub use validation::{CurriculumIssue, ValidationError};
