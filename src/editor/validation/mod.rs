//! Draft validation.
//!
//! Validation is a pure function of the draft and the board context. All
//! rules run and every finding is collected into a sparse
//! [`ValidationReport`]; an empty report means the draft may be submitted.

pub mod report;
pub mod rules;

pub use report::{ItemError, MetadataErrors, ValidationReport};
pub use rules::ValidationContext;

use crate::editor::domain::TaskDraft;

/// Validates `draft` against `context`.
///
/// # Examples
///
/// ```
/// use kanbn_task_editor::editor::domain::TaskIndex;
/// use kanbn_task_editor::editor::domain::TaskDraft;
/// use kanbn_task_editor::editor::validation::{ValidationContext, validate_draft};
///
/// let index = TaskIndex::default();
/// let report = validate_draft(&TaskDraft::default(), &ValidationContext::new(&index, None));
/// assert_eq!(report.name_error(), Some("Task name is required."));
/// ```
#[must_use]
pub fn validate_draft(draft: &TaskDraft, context: &ValidationContext<'_>) -> ValidationReport {
    let mut report = ValidationReport::default();
    rules::check_name_present(draft, &mut report);
    rules::check_name_unique(draft, context, &mut report);
    rules::check_tags(draft, &mut report);
    rules::check_sub_tasks(draft, &mut report);
    rules::check_comments(draft, &mut report);
    report
}
