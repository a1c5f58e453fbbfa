//! Curriculum Editor
//!
//! `CurriculumEditor` owns one course's curriculum while it is being edited.
//! Edits are reduced synchronously against the current snapshot through
//! [`CurriculumAction`]; only fetching and saving talk to the [`CourseApi`].
//!
//! # State Machine
//!
//! ```text
//!            dispatch / toggle
//!               ┌──────┐
//!               ▼      │
//!   open ──▶  Idle ────┘ ──begin_save──▶ Saving ──finish_save──▶ Idle
//!               │                          │
//!               └────────cancel────────────┴──────────▶ Closed
//! ```
//!
//! - Edits and saves while `Saving` fail with [`EditorError::Busy`]; nothing is
//!   queued
//! - A successful save replaces the tree with the server's persisted copy
//! - A failed save keeps the tree, records the error and returns to `Idle`
//! - After `cancel` every call fails with [`EditorError::Closed`]
//!
//! # Examples
//!
//! ```rust
//! use coursedesk_core::client::InMemoryCourseApi;
//! use coursedesk_core::editor::CurriculumEditor;
//! use coursedesk_core::models::Course;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let course: Course = serde_json::from_str(r#"{"id": "c-1", "title": "Rust"}"#)?;
//! let api = Arc::new(InMemoryCourseApi::new().with_course(course));
//! let mut editor = CurriculumEditor::open(api, "c-1").await?;
//!
//! editor.add_section()?;
//! editor.add_lesson(1)?;
//! editor.save().await?;
//! assert!(!editor.has_unsaved_changes());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod expansion;


pub use error::EditorError;
pub use events::EditorEvent;
pub use expansion::ExpansionState;

use crate::aggregates::CurriculumStats;
use crate::client::{ApiError, CourseApi};
use crate::models::{Course, Curriculum};
use crate::operations::{
    Confirmation, CurriculumAction, CurriculumError, LessonUpdate, SectionUpdate,
};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Subscribers that fall this far behind start missing events
const EDITOR_EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Idle,
    Saving,
    Closed,
}

/// Proof that a save was started, redeemed by [`CurriculumEditor::finish_save`]
///
/// Holds the exact snapshot handed to the API.
#[derive(Debug)]
pub struct SaveTicket {
    generation: u64,
    snapshot: Curriculum,
}

impl SaveTicket {
    pub fn snapshot(&self) -> &Curriculum {
        &self.snapshot
    }
}

pub struct CurriculumEditor {
    api: Arc<dyn CourseApi>,
    course_id: String,
    curriculum: Curriculum,
    /// Last snapshot known to match the server
    baseline: Curriculum,
    expansion: ExpansionState,
    status: EditorStatus,
    last_error: Option<EditorError>,
    save_generation: u64,
    events: broadcast::Sender<EditorEvent>,
}

impl std::fmt::Debug for CurriculumEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurriculumEditor")
            .field("course_id", &self.course_id)
            .field("status", &self.status)
            .field("sections", &self.curriculum.section_count())
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl CurriculumEditor {
    /// Fetch a course and start editing its curriculum
    pub async fn open(api: Arc<dyn CourseApi>, course_id: &str) -> Result<Self, EditorError> {
        let course = api.get_course(course_id).await?;
        tracing::info!(
            "Opened curriculum editor for course {} ({} stored sections)",
            course.id,
            course.curriculum.len()
        );
        Ok(Self::from_course(api, &course))
    }

    /// Start editing an already-fetched course
    pub fn from_course(api: Arc<dyn CourseApi>, course: &Course) -> Self {
        let curriculum = course.editable_curriculum();
        let (events, _) = broadcast::channel(EDITOR_EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            course_id: course.id.clone(),
            baseline: curriculum.clone(),
            curriculum,
            expansion: ExpansionState::initial(),
            status: EditorStatus::Idle,
            last_error: None,
            save_generation: 0,
            events,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    /// Error from the most recent failed save, cleared by the next success
    pub fn last_error(&self) -> Option<&EditorError> {
        self.last_error.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn is_expanded(&self, section: usize) -> bool {
        self.expansion.is_expanded(section)
    }

    pub fn stats(&self) -> CurriculumStats {
        CurriculumStats::of(&self.curriculum)
    }

    /// Whether the tree differs from what was last loaded or saved
    pub fn has_unsaved_changes(&self) -> bool {
        self.curriculum != self.baseline
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: EditorEvent) {
        let _ = self.events.send(event);
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        match self.status {
            EditorStatus::Idle => Ok(()),
            EditorStatus::Saving => Err(EditorError::Busy),
            EditorStatus::Closed => Err(EditorError::Closed),
        }
    }

    /// Apply one action to the current snapshot
    ///
    /// A rejected action leaves the tree untouched.
    pub fn dispatch(&mut self, action: CurriculumAction) -> Result<(), EditorError> {
        self.ensure_editable()?;

        let next = action.apply(&self.curriculum).map_err(|e| {
            tracing::debug!("Rejected {} on course {}: {}", action.name(), self.course_id, e);
            e
        })?;

        self.curriculum = next;
        if action.changes_section_count() {
            self.expansion.retain_within(self.curriculum.section_count());
        }

        let stats = self.stats();
        tracing::debug!("Applied {} on course {}: {}", action.name(), self.course_id, stats);
        self.emit(EditorEvent::CurriculumChanged {
            action: action.name(),
            stats,
        });
        Ok(())
    }

    pub fn add_section(&mut self) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::AddSection)
    }

    pub fn update_section(&mut self, section: usize, update: SectionUpdate) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::UpdateSection { section, update })
    }

    pub fn delete_section(
        &mut self,
        section: usize,
        confirmation: Confirmation,
    ) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::DeleteSection {
            section,
            confirmed: confirmation.is_confirmed(),
        })
    }

    pub fn add_lesson(&mut self, section: usize) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::AddLesson { section })
    }

    pub fn update_lesson(
        &mut self,
        section: usize,
        lesson: usize,
        update: LessonUpdate,
    ) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::UpdateLesson {
            section,
            lesson,
            update,
        })
    }

    pub fn delete_lesson(
        &mut self,
        section: usize,
        lesson: usize,
        confirmation: Confirmation,
    ) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::DeleteLesson {
            section,
            lesson,
            confirmed: confirmation.is_confirmed(),
        })
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::MoveSection { from, to })
    }

    pub fn move_lesson(&mut self, section: usize, from: usize, to: usize) -> Result<(), EditorError> {
        self.dispatch(CurriculumAction::MoveLesson { section, from, to })
    }

    /// Flip a section's expansion flag, returning the new value
    ///
    /// Allowed while saving; the tree itself is not touched.
    pub fn toggle_section(&mut self, section: usize) -> Result<bool, EditorError> {
        if self.status == EditorStatus::Closed {
            return Err(EditorError::Closed);
        }
        let len = self.curriculum.section_count();
        if section >= len {
            return Err(CurriculumError::section_not_found(section, len).into());
        }
        Ok(self.expansion.toggle(section))
    }

    /// Enter `Saving` and hand out the snapshot to persist
    ///
    /// # Errors
    ///
    /// - `Busy` if a save is already in flight
    /// - `Closed` after cancel
    /// - `Incomplete` if a section or lesson title is empty; the state stays
    ///   `Idle` and the error is recorded
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        self.ensure_editable()?;

        if let Err(e) = self.curriculum.validate() {
            let err = EditorError::from(e);
            tracing::debug!("Save blocked for course {}: {}", self.course_id, err);
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.status = EditorStatus::Saving;
        self.save_generation += 1;
        self.emit(EditorEvent::SaveStarted {
            course_id: self.course_id.clone(),
        });
        Ok(SaveTicket {
            generation: self.save_generation,
            snapshot: self.curriculum.clone(),
        })
    }

    /// Leave `Saving` with the result of the API round trip
    ///
    /// `outcome` is `Ok(Some(tree))` with the server's persisted copy,
    /// `Ok(None)` when the write succeeded but the copy could not be fetched,
    /// or the error that stopped the write.
    ///
    /// # Errors
    ///
    /// - `Closed` after cancel; the result is discarded
    /// - `NoSaveInProgress` when the editor is `Idle`
    /// - `Busy` when `ticket` belongs to an earlier save
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        outcome: Result<Option<Curriculum>, ApiError>,
    ) -> Result<(), EditorError> {
        match self.status {
            EditorStatus::Closed => {
                tracing::debug!("Discarding save result for closed editor {}", self.course_id);
                return Err(EditorError::Closed);
            }
            EditorStatus::Idle => {
                tracing::warn!("finish_save called with no save in progress");
                return Err(EditorError::NoSaveInProgress);
            }
            EditorStatus::Saving => {}
        }
        if ticket.generation != self.save_generation {
            tracing::warn!(
                "Ignoring save ticket {} while save {} is in flight",
                ticket.generation,
                self.save_generation
            );
            return Err(EditorError::Busy);
        }

        self.status = EditorStatus::Idle;
        match outcome {
            Ok(persisted) => {
                let persisted = persisted.unwrap_or(ticket.snapshot);
                self.curriculum = persisted.clone();
                self.baseline = persisted;
                self.expansion.retain_within(self.curriculum.section_count());
                self.last_error = None;
                tracing::info!("Saved curriculum for course {}", self.course_id);
                self.emit(EditorEvent::Saved {
                    course_id: self.course_id.clone(),
                });
                Ok(())
            }
            Err(api_err) => {
                let err = EditorError::from(api_err);
                tracing::warn!("Failed to save curriculum for course {}: {}", self.course_id, err);
                self.last_error = Some(err.clone());
                self.emit(EditorEvent::SaveFailed {
                    course_id: self.course_id.clone(),
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Persist the current tree and reload the server's copy
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let ticket = self.begin_save()?;
        let api = Arc::clone(&self.api);

        let outcome = match api.save_curriculum(&self.course_id, ticket.snapshot()).await {
            Ok(()) => match api.get_course(&self.course_id).await {
                Ok(course) => Ok(Some(course.editable_curriculum())),
                Err(e) => {
                    tracing::warn!(
                        "Saved course {} but could not reload it, keeping local copy: {}",
                        self.course_id,
                        e
                    );
                    Ok(None)
                }
            },
            Err(e) => Err(e),
        };

        self.finish_save(ticket, outcome)
    }

    /// Discard all edits and close the editor
    pub fn cancel(&mut self) {
        if self.status == EditorStatus::Closed {
            return;
        }
        if self.has_unsaved_changes() {
            tracing::info!("Discarding unsaved curriculum changes for course {}", self.course_id);
        }
        self.curriculum = self.baseline.clone();
        self.status = EditorStatus::Closed;
        self.emit(EditorEvent::Cancelled {
            course_id: self.course_id.clone(),
        });
    }
}
