//! Read-only view model derived from the working state.

use mockable::Clock;

use crate::editor::domain::{DateField, EditorMode, WorkingState, is_overdue_at};

const HEADING_UPDATE: &str = "Update task";
const HEADING_CREATE: &str = "Create new task";

/// What the panel header and side bar display.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSummary {
    heading: &'static str,
    dirty: bool,
    created: Option<String>,
    updated: Option<String>,
    overdue: bool,
    progress: f64,
    column_options: Vec<String>,
}

impl EditorSummary {
    /// Builds the summary of `state` at the current instant of `clock`.
    ///
    /// Creation and update lines are only shown while editing a loaded
    /// task and only when their timestamp renders with the board mask.
    #[must_use]
    pub fn from_state(state: &WorkingState, clock: &impl Clock) -> Self {
        let draft = state.draft();
        let metadata = draft.metadata();
        let editing = state.mode() == EditorMode::Edit;
        let format = state.date_format();

        let created = editing
            .then(|| format.format(metadata.created()))
            .flatten()
            .map(|date| format!("Created {date}"));
        let updated = editing
            .then(|| metadata.updated().and_then(|value| format.format(value)))
            .flatten()
            .map(|date| format!("Updated {date}"));

        Self {
            heading: if editing { HEADING_UPDATE } else { HEADING_CREATE },
            dirty: state.is_dirty(),
            created,
            updated,
            overdue: is_overdue_at(Some(metadata.date(DateField::Due)), clock),
            progress: draft.progress().clamp(0.0, 1.0),
            column_options: state.column_names().to_vec(),
        }
    }

    /// Panel heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        self.heading
    }

    /// Whether the draft has unsubmitted changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// `Created <date>` line.
    #[must_use]
    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    /// `Updated <date>` line.
    #[must_use]
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Whether the draft's due date lies in the past.
    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        self.overdue
    }

    /// Progress bar fill in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Columns offered by the column picker.
    #[must_use]
    pub fn column_options(&self) -> &[String] {
        &self.column_options
    }
}
