//! Curriculum Operations
//!
//! Pure structural mutations over a [`Curriculum`] snapshot. Every function
//! borrows the input tree and returns a brand new one; the input is never
//! modified, so a rejected mutation leaves the caller's snapshot intact.
//!
//! # Ordering Rule
//!
//! Whenever a section or lesson sequence changes length or order, `order`
//! values are reassigned densely as `0..n-1` in sequence order. There are
//! never gaps or duplicates.
//!
//! # Out-of-Range Indices
//!
//! - `update_section` / `update_lesson`: silent no-op (returns an equal tree)
//! - every other operation: [`CurriculumError::SectionNotFound`] or
//!   [`CurriculumError::LessonNotFound`]
//!
//! # Examples
//!
//! ```rust
//! use coursedesk_core::models::Curriculum;
//! use coursedesk_core::operations::{self, Confirmation};
//!
//! let tree = Curriculum::default();
//! let tree = operations::add_section(&tree);
//! let tree = operations::add_lesson(&tree, 1)?;
//! assert_eq!(tree.sections()[1].title, "Section 2");
//! assert_eq!(tree.sections()[1].lessons[0].title, "Lesson 1");
//!
//! let tree = operations::delete_section(&tree, 0, Confirmation::Confirmed)?;
//! assert_eq!(tree.sections()[0].order, 0);
//! # Ok::<(), coursedesk_core::operations::CurriculumError>(())
//! ```

pub mod action;
pub mod error;
pub mod updates;


pub use action::{apply_all, CurriculumAction};
pub use error::CurriculumError;
pub use updates::{LessonUpdate, SectionUpdate};

use crate::models::{Curriculum, LessonNode, SectionNode};
use serde::{Deserialize, Serialize};

/// Explicit confirm signal required by destructive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confirmation {
    Confirmed,
    Unconfirmed,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Unconfirmed
        }
    }
}

fn check_section(tree: &Curriculum, index: usize) -> Result<&SectionNode, CurriculumError> {
    tree.section(index)
        .ok_or_else(|| CurriculumError::section_not_found(index, tree.section_count()))
}

fn check_lesson(
    tree: &Curriculum,
    section_index: usize,
    lesson_index: usize,
) -> Result<(), CurriculumError> {
    let section = check_section(tree, section_index)?;
    if lesson_index >= section.lessons.len() {
        return Err(CurriculumError::lesson_not_found(
            section_index,
            lesson_index,
            section.lessons.len(),
        ));
    }
    Ok(())
}

/// Append an empty section titled `"Section {n+1}"`
pub fn add_section(tree: &Curriculum) -> Curriculum {
    let mut sections = tree.sections().to_vec();
    let next = sections.len();
    sections.push(SectionNode::new(format!("Section {}", next + 1), next));
    Curriculum::renumbered(sections)
}

/// Replace one field of one section; unknown index is a no-op
pub fn update_section(tree: &Curriculum, section_index: usize, update: &SectionUpdate) -> Curriculum {
    if tree.section(section_index).is_none() {
        tracing::debug!(
            "Ignoring update for missing section {} ({} sections)",
            section_index,
            tree.section_count()
        );
        return tree.clone();
    }

    let mut sections = tree.sections().to_vec();
    update.apply_to(&mut sections[section_index]);
    Curriculum::renumbered(sections)
}

/// Remove a section and renumber the rest
///
/// Rejected when the index is unknown, when it is the last section, or when
/// the caller has not confirmed.
pub fn delete_section(
    tree: &Curriculum,
    section_index: usize,
    confirmation: Confirmation,
) -> Result<Curriculum, CurriculumError> {
    check_section(tree, section_index)?;
    if tree.section_count() == 1 {
        return Err(CurriculumError::MinimumSectionViolation);
    }
    if !confirmation.is_confirmed() {
        return Err(CurriculumError::deletion_not_confirmed(format!(
            "section {}",
            section_index
        )));
    }

    let mut sections = tree.sections().to_vec();
    sections.remove(section_index);
    Ok(Curriculum::renumbered(sections))
}

/// Append a default video lesson titled `"Lesson {n+1}"` to a section
pub fn add_lesson(tree: &Curriculum, section_index: usize) -> Result<Curriculum, CurriculumError> {
    check_section(tree, section_index)?;

    let mut sections = tree.sections().to_vec();
    let lessons = &mut sections[section_index].lessons;
    let next = lessons.len();
    lessons.push(LessonNode::new(format!("Lesson {}", next + 1), next));
    Ok(Curriculum::renumbered(sections))
}

/// Replace one field of one lesson; unknown indices are a no-op
pub fn update_lesson(
    tree: &Curriculum,
    section_index: usize,
    lesson_index: usize,
    update: &LessonUpdate,
) -> Curriculum {
    if tree.lesson(section_index, lesson_index).is_none() {
        tracing::debug!(
            "Ignoring update for missing lesson {} in section {}",
            lesson_index,
            section_index
        );
        return tree.clone();
    }

    let mut sections = tree.sections().to_vec();
    update.apply_to(&mut sections[section_index].lessons[lesson_index]);
    Curriculum::renumbered(sections)
}

/// Remove a lesson and renumber its siblings
pub fn delete_lesson(
    tree: &Curriculum,
    section_index: usize,
    lesson_index: usize,
    confirmation: Confirmation,
) -> Result<Curriculum, CurriculumError> {
    check_lesson(tree, section_index, lesson_index)?;
    if !confirmation.is_confirmed() {
        return Err(CurriculumError::deletion_not_confirmed(format!(
            "lesson {} of section {}",
            lesson_index, section_index
        )));
    }

    let mut sections = tree.sections().to_vec();
    sections[section_index].lessons.remove(lesson_index);
    Ok(Curriculum::renumbered(sections))
}

/// Move a section from one position to another, shifting those in between
pub fn move_section(tree: &Curriculum, from: usize, to: usize) -> Result<Curriculum, CurriculumError> {
    check_section(tree, from)?;
    check_section(tree, to)?;

    let mut sections = tree.sections().to_vec();
    let section = sections.remove(from);
    sections.insert(to, section);
    Ok(Curriculum::renumbered(sections))
}

/// Move a lesson within its section
pub fn move_lesson(
    tree: &Curriculum,
    section_index: usize,
    from: usize,
    to: usize,
) -> Result<Curriculum, CurriculumError> {
    check_lesson(tree, section_index, from)?;
    check_lesson(tree, section_index, to)?;

    let mut sections = tree.sections().to_vec();
    let lessons = &mut sections[section_index].lessons;
    let lesson = lessons.remove(from);
    lessons.insert(to, lesson);
    Ok(Curriculum::renumbered(sections))
}
