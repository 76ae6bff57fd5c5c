//! The locally editable copy of a task.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    Comment, CustomField, CustomFieldDefinition, DraftCollection, EditorDomainError, Relation,
    SubTask, Task, TaskData, TaskDataMetadata, derive_slug,
    custom_field::{initial_custom_fields, write_custom_fields},
    dates::{host_timestamp, to_editable_date},
};

/// Built-in date fields of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    /// Work start date.
    Started,
    /// Due date.
    Due,
    /// Completion date.
    Completed,
}

/// A single local edit to a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    /// Renames the task; the identifier is re-derived from the new name.
    SetName(String),
    /// Replaces the description.
    SetDescription(String),
    /// Moves the task to another column.
    SetColumn(String),
    /// Replaces the assignee.
    SetAssigned(String),
    /// Sets a built-in date from a date control value.
    SetDate(DateField, String),
    /// Sets the progress fraction, clamped to `[0, 1]`.
    SetProgress(f64),
    /// Sets or clears the workload estimate.
    SetWorkload(Option<f64>),
    /// Appends a tag.
    AddTag(String),
    /// Replaces the tag at `index`.
    SetTag {
        /// Tag position.
        index: usize,
        /// New tag text.
        value: String,
    },
    /// Removes the tag at the given index.
    RemoveTag(usize),
    /// Appends an empty, open sub-task.
    AddSubTask,
    /// Replaces the text of a sub-task.
    SetSubTaskText {
        /// Sub-task position.
        index: usize,
        /// New text.
        text: String,
    },
    /// Checks or unchecks a sub-task.
    SetSubTaskCompleted {
        /// Sub-task position.
        index: usize,
        /// New completion flag.
        completed: bool,
    },
    /// Removes the sub-task at the given index.
    RemoveSubTask(usize),
    /// Appends an empty relation.
    AddRelation,
    /// Replaces a relation.
    SetRelation {
        /// Relation position.
        index: usize,
        /// New relation.
        relation: Relation,
    },
    /// Removes the relation at the given index.
    RemoveRelation(usize),
    /// Appends an empty comment stamped with the current time.
    AddComment,
    /// Replaces the text of a comment.
    SetCommentText {
        /// Comment position.
        index: usize,
        /// New text.
        text: String,
    },
    /// Replaces the author of a comment.
    SetCommentAuthor {
        /// Comment position.
        index: usize,
        /// New author.
        author: String,
    },
    /// Removes the comment at the given index.
    RemoveComment(usize),
    /// Sets a custom field from a raw control value.
    SetCustomField {
        /// Field name.
        name: String,
        /// Raw control value, coerced to the field kind.
        value: Value,
    },
}

/// Metadata portion of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMetadata {
    created: String,
    updated: Option<String>,
    started: String,
    due: String,
    completed: String,
    assigned: String,
    tags: Vec<String>,
}

impl DraftMetadata {
    /// Creation timestamp.
    #[must_use]
    pub fn created(&self) -> &str {
        &self.created
    }

    /// Last update timestamp.
    #[must_use]
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Returns a built-in date in editable form, empty when unset.
    #[must_use]
    pub fn date(&self, field: DateField) -> &str {
        match field {
            DateField::Started => &self.started,
            DateField::Due => &self.due,
            DateField::Completed => &self.completed,
        }
    }

    /// Assignee, empty when unassigned.
    #[must_use]
    pub fn assigned(&self) -> &str {
        &self.assigned
    }

    /// Ordered tag list.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    fn date_mut(&mut self, field: DateField) -> &mut String {
        match field {
            DateField::Started => &mut self.started,
            DateField::Due => &mut self.due,
            DateField::Completed => &mut self.completed,
        }
    }
}

/// The locally editable copy of a task.
///
/// The identifier is never set directly: it is taken from the host snapshot
/// and re-derived from the name on every rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    id: String,
    name: String,
    description: String,
    column: String,
    progress: f64,
    workload: Option<f64>,
    remaining_workload: Option<f64>,
    metadata: DraftMetadata,
    custom_fields: Vec<CustomField>,
    relations: Vec<Relation>,
    sub_tasks: Vec<SubTask>,
    comments: Vec<Comment>,
}

impl TaskDraft {
    /// Derives a fresh draft from a host snapshot.
    ///
    /// `task` is `None` when creating; the draft is then blank apart from
    /// the column and a creation timestamp taken from `clock`. Built-in
    /// dates are normalized to editable form and custom fields are bound to
    /// `definitions`.
    #[must_use]
    pub fn from_snapshot(
        task: Option<&Task>,
        column_name: &str,
        definitions: &[CustomFieldDefinition],
        clock: &impl Clock,
    ) -> Self {
        let metadata = task.map(|t| &t.metadata);
        let created = metadata
            .and_then(|bag| bag.created.clone())
            .unwrap_or_else(|| host_timestamp(clock.utc()));

        Self {
            id: task.map(|t| t.id.clone()).unwrap_or_default(),
            name: task.map(|t| t.name.clone()).unwrap_or_default(),
            description: task.map(|t| t.description.clone()).unwrap_or_default(),
            column: column_name.to_owned(),
            progress: clamp_progress(task.and_then(|t| t.progress).unwrap_or(0.0)),
            workload: task.and_then(|t| t.workload),
            remaining_workload: task.and_then(|t| t.remaining_workload),
            metadata: DraftMetadata {
                created,
                updated: metadata.and_then(|bag| bag.updated.clone()),
                started: to_editable_date(metadata.and_then(|bag| bag.started.as_deref())),
                due: to_editable_date(metadata.and_then(|bag| bag.due.as_deref())),
                completed: to_editable_date(metadata.and_then(|bag| bag.completed.as_deref())),
                assigned: metadata
                    .and_then(|bag| bag.assigned.clone())
                    .unwrap_or_default(),
                tags: metadata.map(|bag| bag.tags.clone()).unwrap_or_default(),
            },
            custom_fields: initial_custom_fields(definitions, metadata),
            relations: task.map(|t| t.relations.clone()).unwrap_or_default(),
            sub_tasks: task.map(|t| t.sub_tasks.clone()).unwrap_or_default(),
            comments: task.map(|t| t.comments.clone()).unwrap_or_default(),
        }
    }

    /// Identifier derived from the name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Markdown description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Target column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Completion fraction.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Workload estimate.
    #[must_use]
    pub const fn workload(&self) -> Option<f64> {
        self.workload
    }

    /// Metadata portion.
    #[must_use]
    pub const fn metadata(&self) -> &DraftMetadata {
        &self.metadata
    }

    /// Custom field values in definition order.
    #[must_use]
    pub fn custom_fields(&self) -> &[CustomField] {
        &self.custom_fields
    }

    /// Returns the custom field called `name`.
    #[must_use]
    pub fn custom_field(&self, name: &str) -> Option<&CustomField> {
        self.custom_fields.iter().find(|field| field.name == name)
    }

    /// Links to other tasks.
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Checklist items.
    #[must_use]
    pub fn sub_tasks(&self) -> &[SubTask] {
        &self.sub_tasks
    }

    /// Discussion entries.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Applies one local edit.
    ///
    /// New comments are stamped with the current time of `clock` and
    /// authored by `default_author`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorDomainError::IndexOutOfRange`] when an indexed edit
    /// targets a missing entry, or [`EditorDomainError::UnknownCustomField`]
    /// for an undeclared custom field. The draft is unchanged on error.
    pub fn apply(
        &mut self,
        edit: DraftEdit,
        clock: &impl Clock,
        default_author: &str,
    ) -> Result<(), EditorDomainError> {
        match edit {
            DraftEdit::SetName(name) => {
                self.id = derive_slug(&name);
                self.name = name;
            }
            DraftEdit::SetDescription(description) => self.description = description,
            DraftEdit::SetColumn(column) => self.column = column,
            DraftEdit::SetAssigned(assigned) => self.metadata.assigned = assigned,
            DraftEdit::SetDate(field, value) => {
                *self.metadata.date_mut(field) = to_editable_date(Some(value.as_str()));
            }
            DraftEdit::SetProgress(progress) => self.progress = clamp_progress(progress),
            DraftEdit::SetWorkload(workload) => self.workload = workload,
            DraftEdit::AddTag(tag) => self.metadata.tags.push(tag),
            DraftEdit::SetTag { index, value } => {
                *slot(&mut self.metadata.tags, index, DraftCollection::Tags)? = value;
            }
            DraftEdit::RemoveTag(index) => {
                remove_at(&mut self.metadata.tags, index, DraftCollection::Tags)?;
            }
            DraftEdit::AddSubTask => self.sub_tasks.push(SubTask::default()),
            DraftEdit::SetSubTaskText { index, text } => {
                slot(&mut self.sub_tasks, index, DraftCollection::SubTasks)?.text = text;
            }
            DraftEdit::SetSubTaskCompleted { index, completed } => {
                slot(&mut self.sub_tasks, index, DraftCollection::SubTasks)?.completed = completed;
            }
            DraftEdit::RemoveSubTask(index) => {
                remove_at(&mut self.sub_tasks, index, DraftCollection::SubTasks)?;
            }
            DraftEdit::AddRelation => self.relations.push(Relation::default()),
            DraftEdit::SetRelation { index, relation } => {
                *slot(&mut self.relations, index, DraftCollection::Relations)? = relation;
            }
            DraftEdit::RemoveRelation(index) => {
                remove_at(&mut self.relations, index, DraftCollection::Relations)?;
            }
            DraftEdit::AddComment => self.comments.push(Comment::new(
                default_author,
                host_timestamp(clock.utc()),
                "",
            )),
            DraftEdit::SetCommentText { index, text } => {
                slot(&mut self.comments, index, DraftCollection::Comments)?.text = text;
            }
            DraftEdit::SetCommentAuthor { index, author } => {
                slot(&mut self.comments, index, DraftCollection::Comments)?.author = author;
            }
            DraftEdit::RemoveComment(index) => {
                remove_at(&mut self.comments, index, DraftCollection::Comments)?;
            }
            DraftEdit::SetCustomField { name, value } => {
                let field = self
                    .custom_fields
                    .iter_mut()
                    .find(|field| field.name == name)
                    .ok_or(EditorDomainError::UnknownCustomField(name))?;
                field.set_raw(&value);
            }
        }
        Ok(())
    }

    /// Builds the host payload for this draft.
    #[must_use]
    pub fn to_task_data(&self) -> TaskData {
        let mut custom = Map::new();
        write_custom_fields(&self.custom_fields, &mut custom);

        TaskData {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            column: self.column.clone(),
            progress: self.progress,
            workload: self.workload,
            remaining_workload: self.remaining_workload,
            metadata: TaskDataMetadata {
                created: self.metadata.created.clone(),
                updated: self.metadata.updated.clone(),
                started: self.metadata.started.clone(),
                due: self.metadata.due.clone(),
                completed: self.metadata.completed.clone(),
                assigned: self.metadata.assigned.clone(),
                tags: self.metadata.tags.clone(),
                custom,
            },
            relations: self.relations.clone(),
            sub_tasks: self.sub_tasks.clone(),
            comments: self.comments.clone(),
        }
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

fn slot<T>(
    items: &mut [T],
    index: usize,
    collection: DraftCollection,
) -> Result<&mut T, EditorDomainError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(EditorDomainError::IndexOutOfRange {
            collection,
            index,
            len,
        })
}

fn remove_at<T>(
    items: &mut Vec<T>,
    index: usize,
    collection: DraftCollection,
) -> Result<T, EditorDomainError> {
    if index >= items.len() {
        return Err(EditorDomainError::IndexOutOfRange {
            collection,
            index,
            len: items.len(),
        });
    }
    Ok(items.remove(index))
}
