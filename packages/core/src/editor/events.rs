//! Editor events
//!
//! Emitted on a tokio broadcast channel so any number of views can follow
//! one editor. Sends are fire-and-forget: an editor without subscribers
//! behaves exactly the same.

use crate::aggregates::CurriculumStats;
use serde::Serialize;

/// Something observable happened in a [`super::CurriculumEditor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// An action was applied; `stats` describe the new snapshot
    #[serde(rename_all = "camelCase")]
    CurriculumChanged {
        action: &'static str,
        stats: CurriculumStats,
    },

    #[serde(rename_all = "camelCase")]
    SaveStarted { course_id: String },

    /// The curriculum was persisted and the editor holds the server copy
    #[serde(rename_all = "camelCase")]
    Saved { course_id: String },

    /// The save was refused or never reached the server; the tree is unchanged
    #[serde(rename_all = "camelCase")]
    SaveFailed { course_id: String, error: String },

    #[serde(rename_all = "camelCase")]
    Cancelled { course_id: String },
}

impl EditorEvent {
    pub fn event_type(&self) -> &str {
        match self {
            EditorEvent::CurriculumChanged { .. } => "curriculum:changed",
            EditorEvent::SaveStarted { .. } => "save:started",
            EditorEvent::Saved { .. } => "save:succeeded",
            EditorEvent::SaveFailed { .. } => "save:failed",
            EditorEvent::Cancelled { .. } => "editor:cancelled",
        }
    }
}
