//! Lesson Data Structures
//!
//! A `LessonNode` is the leaf of the curriculum tree. The stored record keeps
//! every wire field (a video URL may linger on an article lesson), while
//! [`LessonNode::body`] exposes a tagged view in which only the fields relevant
//! to the lesson's type are reachable.
//!
//! # Examples
//!
//! ```rust
//! use coursedesk_core::models::{LessonBody, LessonNode, LessonType};
//!
//! let lesson = LessonNode::new("Installing the toolchain", 0)
//!     .with_video_url("https://cdn.example.com/install.mp4")
//!     .with_duration(12);
//!
//! match lesson.body() {
//!     LessonBody::Video { url, .. } => assert!(url.is_some()),
//!     _ => unreachable!(),
//! }
//!
//! // Switching type keeps the stored URL but hides it from the typed view
//! let article = lesson.with_type(LessonType::Article);
//! assert!(article.video_url.is_some());
//! assert!(matches!(article.body(), LessonBody::Article { .. }));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Title given to the lesson seeded into a brand new course
pub const WELCOME_LESSON_TITLE: &str = "Welcome to the Course";

/// Closed set of lesson kinds
///
/// Serialized in lowercase (`"video"`, `"article"`, `"quiz"`, `"assignment"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    /// Streamed video, `videoUrl` is meaningful
    #[default]
    Video,
    /// Written lesson, `content` is the article text
    Article,
    /// Quiz placeholder, `content` holds instructions
    Quiz,
    /// Hands-on assignment, `content` holds instructions
    Assignment,
}

impl LessonType {
    /// All variants in display order
    pub const ALL: [LessonType; 4] = [
        LessonType::Video,
        LessonType::Article,
        LessonType::Quiz,
        LessonType::Assignment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
        }
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Self::Video),
            "article" => Ok(Self::Article),
            "quiz" => Ok(Self::Quiz),
            "assignment" => Ok(Self::Assignment),
            other => Err(format!("Invalid lesson type: {}", other)),
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-gated view over a lesson's content fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonBody<'a> {
    Video {
        url: Option<&'a str>,
        notes: &'a str,
    },
    Article {
        text: &'a str,
    },
    Quiz {
        instructions: &'a str,
    },
    Assignment {
        instructions: &'a str,
    },
}

/// A single content unit inside a section.
///
/// # Fields
///
/// - `title`: display title, must be non-empty before saving
/// - `lesson_type`: serialized as `type`
/// - `content`: free-text body, meaning depends on `lesson_type`
/// - `video_url`: used only by video lessons, preserved for every type
/// - `duration`: minutes
/// - `is_preview`: viewable without enrollment
/// - `order`: position in the parent section, kept dense by the operations layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonNode {
    pub title: String,

    #[serde(rename = "type", default)]
    pub lesson_type: LessonType,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[serde(default)]
    pub duration: u32,

    #[serde(default)]
    pub is_preview: bool,

    #[serde(default)]
    pub order: usize,
}

impl LessonNode {
    /// Create a video lesson with no content, zero duration and preview off
    pub fn new(title: impl Into<String>, order: usize) -> Self {
        Self {
            title: title.into(),
            lesson_type: LessonType::Video,
            content: String::new(),
            video_url: None,
            duration: 0,
            is_preview: false,
            order,
        }
    }

    /// The lesson every new course starts with
    pub fn welcome() -> Self {
        Self::new(WELCOME_LESSON_TITLE, 0)
    }

    pub fn with_type(mut self, lesson_type: LessonType) -> Self {
        self.lesson_type = lesson_type;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_preview(mut self, is_preview: bool) -> Self {
        self.is_preview = is_preview;
        self
    }

    /// Typed view of the content fields that matter for this lesson's type
    pub fn body(&self) -> LessonBody<'_> {
        match self.lesson_type {
            LessonType::Video => LessonBody::Video {
                url: self.video_url.as_deref(),
                notes: &self.content,
            },
            LessonType::Article => LessonBody::Article {
                text: &self.content,
            },
            LessonType::Quiz => LessonBody::Quiz {
                instructions: &self.content,
            },
            LessonType::Assignment => LessonBody::Assignment {
                instructions: &self.content,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lesson_type_round_trips_through_strings() {
        for lesson_type in LessonType::ALL {
            assert_eq!(lesson_type.to_string().parse::<LessonType>(), Ok(lesson_type));
        }
        assert_eq!("QUIZ".parse::<LessonType>(), Ok(LessonType::Quiz));
        assert!("podcast".parse::<LessonType>().is_err());
    }

    #[test]
    fn test_new_lesson_defaults() {
        let lesson = LessonNode::new("Lesson 1", 0);
        assert_eq!(lesson.lesson_type, LessonType::Video);
        assert_eq!(lesson.duration, 0);
        assert!(!lesson.is_preview);
        assert!(lesson.video_url.is_none());
        assert!(lesson.content.is_empty());
    }

    #[test]
    fn test_body_hides_video_url_for_non_video_types() {
        let lesson = LessonNode::new("Reading", 0)
            .with_video_url("https://example.com/v.mp4")
            .with_content("Chapter text")
            .with_type(LessonType::Article);

        assert_eq!(
            lesson.body(),
            LessonBody::Article {
                text: "Chapter text"
            }
        );
        assert_eq!(
            lesson.video_url.as_deref(),
            Some("https://example.com/v.mp4")
        );
    }

    #[test]
    fn test_body_for_quiz_and_assignment() {
        let quiz = LessonNode::new("Check", 0)
            .with_type(LessonType::Quiz)
            .with_content("Answer all questions");
        assert_eq!(
            quiz.body(),
            LessonBody::Quiz {
                instructions: "Answer all questions"
            }
        );

        let task = quiz.with_type(LessonType::Assignment);
        assert!(matches!(task.body(), LessonBody::Assignment { .. }));
    }

    #[test]
    fn test_wire_format_uses_camel_case_and_type_key() {
        let lesson = LessonNode::new("Intro", 2)
            .with_video_url("https://example.com/intro.mp4")
            .with_duration(7)
            .with_preview(true);

        let value = serde_json::to_value(&lesson).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Intro",
                "type": "video",
                "content": "",
                "videoUrl": "https://example.com/intro.mp4",
                "duration": 7,
                "isPreview": true,
                "order": 2
            })
        );
    }

    #[test]
    fn test_missing_optional_fields_deserialize_to_defaults() {
        let lesson: LessonNode = serde_json::from_value(json!({
            "title": "Bare",
            "type": "article"
        }))
        .unwrap();

        assert_eq!(lesson.lesson_type, LessonType::Article);
        assert_eq!(lesson.duration, 0);
        assert_eq!(lesson.order, 0);
        assert!(!lesson.is_preview);
    }
}
