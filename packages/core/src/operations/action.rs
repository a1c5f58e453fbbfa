//! Tagged curriculum actions
//!
//! `CurriculumAction` names one mutation together with its arguments. The
//! editor reduces actions against its current snapshot, and the CLI reads
//! scripts of them from JSON:
//!
//! ```json
//! [
//!   {"action": "addSection"},
//!   {"action": "addLesson", "section": 1},
//!   {"action": "updateLesson", "section": 1, "lesson": 0,
//!    "update": {"field": "duration", "value": 15}},
//!   {"action": "deleteSection", "section": 0, "confirmed": true}
//! ]
//! ```

use crate::models::Curriculum;
use crate::operations::{self, Confirmation, CurriculumError, LessonUpdate, SectionUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CurriculumAction {
    AddSection,
    UpdateSection {
        section: usize,
        update: SectionUpdate,
    },
    DeleteSection {
        section: usize,
        #[serde(default)]
        confirmed: bool,
    },
    AddLesson {
        section: usize,
    },
    UpdateLesson {
        section: usize,
        lesson: usize,
        update: LessonUpdate,
    },
    DeleteLesson {
        section: usize,
        lesson: usize,
        #[serde(default)]
        confirmed: bool,
    },
    MoveSection {
        from: usize,
        to: usize,
    },
    MoveLesson {
        section: usize,
        from: usize,
        to: usize,
    },
}

impl CurriculumAction {
    /// Produce the next snapshot, or the reason this action was rejected
    pub fn apply(&self, tree: &Curriculum) -> Result<Curriculum, CurriculumError> {
        match self {
            Self::AddSection => Ok(operations::add_section(tree)),
            Self::UpdateSection { section, update } => {
                Ok(operations::update_section(tree, *section, update))
            }
            Self::DeleteSection { section, confirmed } => {
                operations::delete_section(tree, *section, Confirmation::from(*confirmed))
            }
            Self::AddLesson { section } => operations::add_lesson(tree, *section),
            Self::UpdateLesson {
                section,
                lesson,
                update,
            } => Ok(operations::update_lesson(tree, *section, *lesson, update)),
            Self::DeleteLesson {
                section,
                lesson,
                confirmed,
            } => operations::delete_lesson(tree, *section, *lesson, Confirmation::from(*confirmed)),
            Self::MoveSection { from, to } => operations::move_section(tree, *from, *to),
            Self::MoveLesson { section, from, to } => {
                operations::move_lesson(tree, *section, *from, *to)
            }
        }
    }

    /// Whether a successful application can change the number of sections
    pub fn changes_section_count(&self) -> bool {
        matches!(self, Self::AddSection | Self::DeleteSection { .. })
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSection => "addSection",
            Self::UpdateSection { .. } => "updateSection",
            Self::DeleteSection { .. } => "deleteSection",
            Self::AddLesson { .. } => "addLesson",
            Self::UpdateLesson { .. } => "updateLesson",
            Self::DeleteLesson { .. } => "deleteLesson",
            Self::MoveSection { .. } => "moveSection",
            Self::MoveLesson { .. } => "moveLesson",
        }
    }
}

/// Reduce a whole script of actions, stopping at the first rejection
///
/// Returns the final snapshot, or the index of the failing action with its
/// error. Nothing is applied partially: on failure the caller still holds the
/// original tree.
pub fn apply_all(
    tree: &Curriculum,
    actions: &[CurriculumAction],
) -> Result<Curriculum, (usize, CurriculumError)> {
    actions
        .iter()
        .enumerate()
        .try_fold(tree.clone(), |current, (index, action)| {
            action.apply(&current).map_err(|err| (index, err))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_deserializes() {
        let actions: Vec<CurriculumAction> = serde_json::from_value(json!([
            {"action": "addSection"},
            {"action": "addLesson", "section": 1},
            {"action": "updateSection", "section": 0,
             "update": {"field": "title", "value": "Start Here"}},
            {"action": "deleteLesson", "section": 1, "lesson": 0}
        ]))
        .unwrap();

        assert_eq!(actions[0], CurriculumAction::AddSection);
        assert_eq!(
            actions[3],
            CurriculumAction::DeleteLesson {
                section: 1,
                lesson: 0,
                confirmed: false
            }
        );
    }

    #[test]
    fn test_apply_all_reports_failing_index() {
        let actions = vec![
            CurriculumAction::AddSection,
            CurriculumAction::DeleteSection {
                section: 0,
                confirmed: false,
            },
        ];

        let err = apply_all(&Curriculum::default(), &actions).unwrap_err();
        assert_eq!(err.0, 1);
        assert!(matches!(err.1, CurriculumError::DeletionNotConfirmed { .. }));
    }

    #[test]
    fn test_apply_all_runs_script_in_order() {
        let actions = vec![
            CurriculumAction::AddSection,
            CurriculumAction::AddLesson { section: 1 },
            CurriculumAction::MoveSection { from: 1, to: 0 },
        ];

        let tree = apply_all(&Curriculum::default(), &actions).unwrap();
        assert_eq!(tree.sections()[0].title, "Section 2");
        assert_eq!(tree.sections()[0].lessons.len(), 1);
        assert!(tree.is_densely_ordered());
    }
}
