//! Course Records
//!
//! The course record as the API returns it, plus the create/patch payloads the
//! course-metadata form sends. The curriculum travels inside the record as raw
//! sections; the editor hydrates them into a [`crate::models::Curriculum`].

use crate::models::{Coupon, Curriculum, SectionNode, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Target audience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    AllLevels,
}

/// Publication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Course record including its curriculum and coupons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: CourseStatus,
    #[serde(default)]
    pub curriculum: Vec<SectionNode>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Draft course with no curriculum, coupons or timestamps
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            category: String::new(),
            level: CourseLevel::default(),
            price: 0.0,
            status: CourseStatus::default(),
            curriculum: Vec::new(),
            coupons: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_curriculum(mut self, curriculum: Vec<SectionNode>) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn with_coupons(mut self, coupons: Vec<Coupon>) -> Self {
        self.coupons = coupons;
        self
    }

    /// Hydrate the stored sections into an editable curriculum
    pub fn editable_curriculum(&self) -> Curriculum {
        Curriculum::from_sections(self.curriculum.clone())
    }

    pub fn coupon(&self, coupon_id: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|coupon| coupon.id == coupon_id)
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::missing_field("title"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::out_of_range(
            "price",
            format!("must be a non-negative amount, got {}", price),
        ));
    }
    Ok(())
}

/// Payload for creating a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: CourseStatus,
}

impl CourseInput {
    /// Draft course with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            category: String::new(),
            level: CourseLevel::default(),
            price: 0.0,
            status: CourseStatus::default(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_level(mut self, level: CourseLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Trim text fields and check the title and price
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        self.title = self.title.trim().to_string();
        self.subtitle = self.subtitle.trim().to_string();
        self.category = self.category.trim().to_string();
        validate_title(&self.title)?;
        validate_price(self.price)?;
        Ok(self)
    }
}

/// Partial update for course metadata; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<CourseLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,
}

impl CoursePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_status(mut self, status: CourseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.level.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }

    /// Trim provided text fields and validate provided values
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(title) = self.title.as_mut() {
            *title = title.trim().to_string();
            validate_title(title)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(self)
    }

    /// Copy every provided field onto `course`
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            course.subtitle = subtitle.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(category) = &self.category {
            course.category = category.clone();
        }
        if let Some(level) = self.level {
            course.level = level;
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(status) = self.status {
            course.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_input_normalized_trims_title() {
        let input = CourseInput::new("  Rust for Beginners ").normalized().unwrap();
        assert_eq!(input.title, "Rust for Beginners");
    }

    #[test]
    fn test_course_input_rejects_blank_title_and_negative_price() {
        assert!(matches!(
            CourseInput::new("   ").normalized(),
            Err(ValidationError::MissingField(_))
        ));
        assert!(matches!(
            CourseInput::new("Rust").with_price(-1.0).normalized(),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(CourseInput::new("Rust")
            .with_price(f64::NAN)
            .normalized()
            .is_err());
    }

    #[test]
    fn test_patch_applies_only_provided_fields() {
        let mut course: Course = serde_json::from_value(json!({
            "id": "c1",
            "title": "Old",
            "price": 20.0,
            "category": "dev"
        }))
        .unwrap();

        CoursePatch::new()
            .with_title("New")
            .with_status(CourseStatus::Published)
            .apply_to(&mut course);

        assert_eq!(course.title, "New");
        assert_eq!(course.status, CourseStatus::Published);
        assert_eq!(course.price, 20.0);
        assert_eq!(course.category, "dev");
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = CoursePatch::new().with_price(9.5);
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"price": 9.5}));
        assert!(!patch.is_empty());
        assert!(CoursePatch::new().is_empty());
    }

    #[test]
    fn test_course_level_wire_names() {
        assert_eq!(
            serde_json::to_value(CourseLevel::AllLevels).unwrap(),
            json!("allLevels")
        );
        assert_eq!(
            serde_json::to_value(CourseStatus::Archived).unwrap(),
            json!("archived")
        );
    }

    #[test]
    fn test_empty_stored_curriculum_hydrates_default() {
        let course: Course = serde_json::from_value(json!({"id": "c1", "title": "T"})).unwrap();
        let curriculum = course.editable_curriculum();
        assert_eq!(curriculum.section_count(), 1);
        assert_eq!(curriculum.sections()[0].lessons.len(), 1);
    }
}
