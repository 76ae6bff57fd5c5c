//! Working state of an editor panel.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CustomFieldDefinition, DisplayDateFormat, HostSnapshot, Task, TaskDraft};

/// Whether the panel creates a new task or edits a loaded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    /// No task is loaded; submitting creates one.
    Create,
    /// A task is loaded; submitting updates it.
    Edit,
}

/// Presentation flags that survive snapshot replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiModes {
    /// Description is shown as an editor rather than rendered markdown.
    pub editing_description: bool,
    /// Comment shown as an editor, if any.
    pub editing_comment: Option<usize>,
}

/// Tasks known on the board, keyed by identifier.
///
/// Later entries replace earlier ones with the same identifier; insertion
/// order is kept for relation pickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskIndex(Vec<Task>);

impl TaskIndex {
    /// Builds an index from the host task list.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut entries: Vec<Task> = Vec::new();
        for task in tasks {
            match entries.iter_mut().find(|existing| existing.id == task.id) {
                Some(existing) => *existing = task,
                None => entries.push(task),
            }
        }
        Self(entries)
    }

    /// Returns the task with identifier `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.0.iter().find(|task| task.id == id)
    }

    /// Returns `true` when a task with identifier `id` is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over known task identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|task| task.id.as_str())
    }

    /// Iterates over known tasks.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.0.iter()
    }

    /// Number of known tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no task is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the panel needs to render and edit one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingState {
    snapshot_kind: String,
    task: Option<Task>,
    tasks: TaskIndex,
    column_name: String,
    column_names: Vec<String>,
    custom_fields: Vec<CustomFieldDefinition>,
    date_format: DisplayDateFormat,
    draft: TaskDraft,
    baseline: TaskDraft,
    ui: UiModes,
}

impl WorkingState {
    /// Builds a working state from a host snapshot.
    ///
    /// The draft is derived from scratch; only `ui` is carried over from
    /// the previous state. An empty board date mask is replaced by
    /// `fallback_format`. Custom field definitions named after a built-in
    /// metadata key are dropped.
    #[must_use]
    pub fn from_snapshot(
        snapshot: HostSnapshot,
        ui: UiModes,
        fallback_format: &DisplayDateFormat,
        clock: &impl Clock,
    ) -> Self {
        let HostSnapshot {
            kind,
            task,
            tasks,
            column_name,
            index,
            custom_fields,
            date_format,
        } = snapshot;

        let custom_fields = usable_definitions(custom_fields);
        let draft =
            TaskDraft::from_snapshot(task.as_ref(), &column_name, &custom_fields, clock);
        let date_format = if date_format.is_empty() {
            fallback_format.clone()
        } else {
            date_format
        };

        Self {
            snapshot_kind: kind,
            task,
            tasks: TaskIndex::from_tasks(tasks),
            column_name,
            column_names: index.column_names(),
            custom_fields,
            date_format,
            baseline: draft.clone(),
            draft,
            ui,
        }
    }

    /// Current mode, decided by whether the host loaded a task.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        if self.task.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Create
        }
    }

    /// Type tag of the last host snapshot.
    #[must_use]
    pub fn snapshot_kind(&self) -> &str {
        &self.snapshot_kind
    }

    /// Task as last pushed by the host.
    #[must_use]
    pub const fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Tasks known on the board.
    #[must_use]
    pub const fn tasks(&self) -> &TaskIndex {
        &self.tasks
    }

    /// Column the editor was opened from.
    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Valid column names in board order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Board custom field definitions.
    #[must_use]
    pub fn custom_fields(&self) -> &[CustomFieldDefinition] {
        &self.custom_fields
    }

    /// Display date mask.
    #[must_use]
    pub const fn date_format(&self) -> &DisplayDateFormat {
        &self.date_format
    }

    /// Draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    /// Draft as last received or submitted.
    #[must_use]
    pub const fn baseline(&self) -> &TaskDraft {
        &self.baseline
    }

    /// Presentation flags.
    #[must_use]
    pub const fn ui(&self) -> UiModes {
        self.ui
    }

    /// Returns `true` when the draft differs from its baseline.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.baseline
    }

    pub(crate) const fn draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.draft
    }

    pub(crate) const fn ui_mut(&mut self) -> &mut UiModes {
        &mut self.ui
    }

    /// Makes the current draft the new baseline.
    pub(crate) fn commit_draft(&mut self) {
        self.baseline = self.draft.clone();
    }
}

fn usable_definitions(definitions: Vec<CustomFieldDefinition>) -> Vec<CustomFieldDefinition> {
    definitions
        .into_iter()
        .filter(|definition| {
            if definition.is_reserved() {
                warn!(
                    field = %definition.name,
                    "ignoring custom field named after a built-in metadata key"
                );
                false
            } else {
                true
            }
        })
        .collect()
}

/// Lifecycle state of an editor panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "state", rename_all = "snake_case")]
pub enum PanelState {
    /// No host snapshot has arrived yet.
    #[default]
    Uninitialized,
    /// A snapshot has been applied.
    Ready(Box<WorkingState>),
}

impl PanelState {
    /// Returns the working state once ready.
    #[must_use]
    pub fn working(&self) -> Option<&WorkingState> {
        match self {
            Self::Uninitialized => None,
            Self::Ready(state) => Some(state),
        }
    }

    /// Returns the mutable working state once ready.
    pub(crate) fn working_mut(&mut self) -> Option<&mut WorkingState> {
        match self {
            Self::Uninitialized => None,
            Self::Ready(state) => Some(state),
        }
    }

    /// Presentation flags, defaulted before the first snapshot.
    #[must_use]
    pub fn ui(&self) -> UiModes {
        self.working().map(WorkingState::ui).unwrap_or_default()
    }
}
