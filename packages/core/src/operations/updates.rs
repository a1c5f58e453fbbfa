//! Single-field update variants
//!
//! Each variant names exactly one field, so an update can never touch more
//! than the field it targets. On the wire they are adjacently tagged:
//! `{"field": "duration", "value": 12}`.

use crate::models::{LessonNode, LessonType, SectionNode};
use serde::{Deserialize, Serialize};

/// One-field change to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SectionUpdate {
    Title(String),
    Description(String),
}

impl SectionUpdate {
    pub(crate) fn apply_to(&self, section: &mut SectionNode) {
        match self {
            Self::Title(title) => section.title = title.clone(),
            Self::Description(description) => section.description = description.clone(),
        }
    }
}

/// One-field change to a lesson
///
/// No cross-field checks happen here: setting a video URL on an article is
/// accepted and simply unused until the lesson becomes a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LessonUpdate {
    Title(String),
    Type(LessonType),
    Content(String),
    VideoUrl(Option<String>),
    /// Minutes
    Duration(u32),
    Preview(bool),
}

impl LessonUpdate {
    pub(crate) fn apply_to(&self, lesson: &mut LessonNode) {
        match self {
            Self::Title(title) => lesson.title = title.clone(),
            Self::Type(lesson_type) => lesson.lesson_type = *lesson_type,
            Self::Content(content) => lesson.content = content.clone(),
            Self::VideoUrl(url) => lesson.video_url = url.clone(),
            Self::Duration(minutes) => lesson.duration = *minutes,
            Self::Preview(is_preview) => lesson.is_preview = *is_preview,
        }
    }
}
