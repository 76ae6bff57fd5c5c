//! Individual validation rules.
//!
//! Each rule inspects one aspect of a draft and records its findings in the
//! report. Rules never short-circuit each other.

use crate::editor::domain::{Task, TaskDraft, TaskIndex};

use super::ValidationReport;

/// Message for an empty derived identifier.
pub const NAME_REQUIRED: &str = "Task name is required.";
/// Message for an identifier already used by another task.
pub const NAME_TAKEN: &str = "There is already a task with the same name or id.";
/// Message for an empty tag.
pub const TAG_EMPTY: &str = "Tag cannot be empty.";
/// Message for a sub-task without text.
pub const SUB_TASK_EMPTY: &str = "Sub-task text cannot be empty.";
/// Message for a comment without text.
pub const COMMENT_EMPTY: &str = "Comment text cannot be empty.";

/// Board context a draft is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Tasks known on the board.
    pub known_tasks: &'a TaskIndex,
    /// Task being edited; `None` when creating.
    pub loaded_task: Option<&'a Task>,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(known_tasks: &'a TaskIndex, loaded_task: Option<&'a Task>) -> Self {
        Self {
            known_tasks,
            loaded_task,
        }
    }
}

/// Flags a draft whose name derives to an empty identifier.
pub fn check_name_present(draft: &TaskDraft, report: &mut ValidationReport) {
    if draft.id().is_empty() {
        report.set_name_error(NAME_REQUIRED);
    }
}

/// Flags a draft whose identifier belongs to another known task.
///
/// When creating, any known task with the identifier collides. When
/// editing, the loaded task itself is skipped: tasks are matched by their
/// host unique id when both carry one, and by their host identifier
/// otherwise. Only the local snapshot of the board is consulted.
pub fn check_name_unique(
    draft: &TaskDraft,
    context: &ValidationContext<'_>,
    report: &mut ValidationReport,
) {
    let Some(existing) = context.known_tasks.get(draft.id()) else {
        return;
    };
    if !is_loaded_task(existing, context.loaded_task) {
        report.set_name_error(NAME_TAKEN);
    }
}

fn is_loaded_task(candidate: &Task, loaded: Option<&Task>) -> bool {
    let Some(loaded_task) = loaded else {
        return false;
    };
    match (candidate.uuid.as_deref(), loaded_task.uuid.as_deref()) {
        (Some(candidate_uuid), Some(loaded_uuid)) => candidate_uuid == loaded_uuid,
        _ => candidate.id == loaded_task.id,
    }
}

/// Flags every empty tag.
pub fn check_tags(draft: &TaskDraft, report: &mut ValidationReport) {
    for (index, tag) in draft.metadata().tags().iter().enumerate() {
        if tag.is_empty() {
            report.add_tag_error(index, TAG_EMPTY);
        }
    }
}

/// Flags every sub-task without text.
pub fn check_sub_tasks(draft: &TaskDraft, report: &mut ValidationReport) {
    for (index, sub_task) in draft.sub_tasks().iter().enumerate() {
        if sub_task.text.is_empty() {
            report.add_sub_task_error(index, SUB_TASK_EMPTY);
        }
    }
}

/// Flags every comment without text.
pub fn check_comments(draft: &TaskDraft, report: &mut ValidationReport) {
    for (index, comment) in draft.comments().iter().enumerate() {
        if comment.text.is_empty() {
            report.add_comment_error(index, COMMENT_EMPTY);
        }
    }
}
