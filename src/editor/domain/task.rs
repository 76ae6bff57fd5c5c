//! Task records as exchanged with the host.
//!
//! These types mirror the host's JSON shape. Every field defaults when the
//! host omits it or sends `null`, so partially populated snapshots still
//! decode.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decodes a field, treating an explicit `null` like an absent key.
pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A task record as pushed by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id assigned by the host; never edited locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Identifier derived from the task name, unique within the board.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text markdown description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Column the task currently sits in.
    #[serde(deserialize_with = "null_as_default")]
    pub column: String,
    /// Estimated workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<f64>,
    /// Remaining workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_workload: Option<f64>,
    /// Completion fraction in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Timestamps, assignee, tags and custom field values.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: TaskMetadata,
    /// Links to other tasks.
    #[serde(deserialize_with = "null_as_default")]
    pub relations: Vec<Relation>,
    /// Checklist items.
    #[serde(deserialize_with = "null_as_default")]
    pub sub_tasks: Vec<SubTask>,
    /// Discussion entries.
    #[serde(deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

/// Metadata bag of a task.
///
/// Custom field values live next to the fixed keys, keyed by field name,
/// and are kept in [`TaskMetadata::custom`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetadata {
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Work start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Completion date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    /// Assignee name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<String>,
    /// Ordered tag list.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Remaining keys, including custom field values.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl TaskMetadata {
    /// Looks up a metadata key, covering both fixed keys and custom ones.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<Value> {
        let fixed = match key {
            "created" => &self.created,
            "updated" => &self.updated,
            "started" => &self.started,
            "due" => &self.due,
            "completed" => &self.completed,
            "assigned" => &self.assigned,
            "tags" => {
                return Some(Value::Array(
                    self.tags.iter().cloned().map(Value::String).collect(),
                ));
            }
            _ => return self.custom.get(key).cloned(),
        };
        fixed.clone().map(Value::String)
    }
}

/// A typed link from one task to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relation {
    /// Relation type, for example `blocks` or `duplicates`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Identifier of the target task.
    #[serde(deserialize_with = "null_as_default")]
    pub task: String,
}

impl Relation {
    /// Creates a relation of `kind` pointing at `task`.
    #[must_use]
    pub fn new(kind: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            task: task.into(),
        }
    }
}

/// A checklist item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTask {
    /// Item text.
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    /// Whether the item is done.
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl SubTask {
    /// Creates an open checklist item.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// A discussion entry on a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    /// Author name.
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    /// Timestamp the comment was written.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Markdown body.
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(author: impl Into<String>, date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            date: date.into(),
            text: text.into(),
        }
    }
}
