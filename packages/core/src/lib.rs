//! CourseDesk Core
//!
//! Curriculum editing for online courses: the section/lesson tree, the pure
//! mutations over it, display aggregates, the editor controller that persists
//! the tree through the course API, and the course/coupon services around it.
//!
//! # Architecture
//!
//! - **Immutable snapshots**: every mutation returns a new [`Curriculum`]; a
//!   rejected mutation leaves the previous one untouched
//! - **Dense ordering**: section and lesson `order` values always read `0..n-1`
//! - **Single writer**: the editor applies edits synchronously; only fetch and
//!   save are async
//! - **Whole-tree saves**: the curriculum is replaced atomically on the server
//!
//! # Modules
//!
//! - [`models`] - Curriculum tree, course and coupon records, validation
//! - [`operations`] - Structural mutations and the `CurriculumAction` reducer
//! - [`aggregates`] - Duration and lesson counts
//! - [`editor`] - `CurriculumEditor` state machine and events
//! - [`client`] - `CourseApi` trait with HTTP and in-memory implementations
//! - [`services`] - Course and coupon services
//! - [`config`] - Client configuration loading

pub mod aggregates;
pub mod client;
pub mod config;
pub mod editor;
pub mod models;
pub mod operations;
pub mod services;

// Re-export commonly used types
pub use aggregates::CurriculumStats;
pub use client::{ApiError, CourseApi, HttpCourseApi, InMemoryCourseApi};
pub use config::{ClientConfig, ConfigError};
pub use editor::{CurriculumEditor, EditorError, EditorEvent, EditorStatus};
pub use models::*;
pub use operations::{Confirmation, CurriculumAction, CurriculumError, LessonUpdate, SectionUpdate};
pub use services::{CouponService, CourseService, ServiceError};
