//! Messages exchanged between the host and the editor panel.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::{
    Comment, CustomFieldDefinition, DisplayDateFormat, EditorDomainError, Relation, SubTask, Task,
    task::null_as_default,
};

/// Authoritative board state pushed by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostSnapshot {
    /// Message type tag set by the host.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Task being edited; `None` when creating a new task.
    pub task: Option<Task>,
    /// Every task known on the board.
    #[serde(deserialize_with = "lenient_list")]
    pub tasks: Vec<Task>,
    /// Column the editor was opened from.
    #[serde(deserialize_with = "null_as_default")]
    pub column_name: String,
    /// Board index; only its column names are used.
    #[serde(deserialize_with = "null_as_default")]
    pub index: BoardIndex,
    /// Custom fields declared on the board.
    #[serde(deserialize_with = "lenient_list")]
    pub custom_fields: Vec<CustomFieldDefinition>,
    /// Display date mask configured on the board.
    #[serde(deserialize_with = "null_as_default")]
    pub date_format: DisplayDateFormat,
}

impl HostSnapshot {
    /// Decodes a snapshot from a raw JSON frame.
    ///
    /// Absent or `null` fields default and malformed entries in `tasks` or
    /// `customFields` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EditorDomainError::MalformedSnapshot`] when the frame is not
    /// a JSON object of the snapshot shape.
    pub fn from_json(frame: &str) -> Result<Self, EditorDomainError> {
        serde_json::from_str(frame)
            .map_err(|err| EditorDomainError::MalformedSnapshot(err.to_string()))
    }
}

/// Board index as sent by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardIndex {
    /// Columns keyed by name, in board order.
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Map<String, Value>,
}

impl BoardIndex {
    /// Returns the column names in board order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(error = %err, "dropping malformed entry from host snapshot");
                None
            }
        })
        .collect())
}

/// Task payload sent to the host on submit, delete and archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskData {
    /// Identifier derived from the name.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Markdown description.
    pub description: String,
    /// Target column.
    pub column: String,
    /// Completion fraction.
    pub progress: f64,
    /// Estimated workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<f64>,
    /// Remaining workload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_workload: Option<f64>,
    /// Timestamps, assignee, tags and custom field values.
    pub metadata: TaskDataMetadata,
    /// Links to other tasks.
    pub relations: Vec<Relation>,
    /// Checklist items.
    pub sub_tasks: Vec<SubTask>,
    /// Discussion entries.
    pub comments: Vec<Comment>,
}

/// Metadata block of [`TaskData`].
///
/// Date fields are `yyyy-mm-dd` strings, empty when unset. Custom field
/// values follow the fixed keys, `null` when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDataMetadata {
    /// Creation timestamp.
    pub created: String,
    /// Last update timestamp, `null` when never updated.
    pub updated: Option<String>,
    /// Work start date.
    pub started: String,
    /// Due date.
    pub due: String,
    /// Completion date.
    pub completed: String,
    /// Assignee.
    pub assigned: String,
    /// Ordered tag list.
    pub tags: Vec<String>,
    /// Custom field values keyed by field name.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

/// Intent messages the panel sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all_fields = "camelCase")]
pub enum OutboundMessage {
    /// Create a new task.
    #[serde(rename = "kanbn.create")]
    Create {
        /// Submitted draft.
        task_data: TaskData,
        /// Board custom field definitions.
        custom_fields: Vec<CustomFieldDefinition>,
    },
    /// Update the loaded task.
    #[serde(rename = "kanbn.update")]
    Update {
        /// Identifier of the task as last pushed by the host.
        task_id: String,
        /// Submitted draft.
        task_data: TaskData,
        /// Board custom field definitions.
        custom_fields: Vec<CustomFieldDefinition>,
    },
    /// Delete the loaded task.
    #[serde(rename = "kanbn.delete")]
    Delete {
        /// Identifier of the task as last pushed by the host.
        task_id: String,
        /// Current draft.
        task_data: TaskData,
    },
    /// Archive the loaded task.
    #[serde(rename = "kanbn.archive")]
    Archive {
        /// Identifier of the task as last pushed by the host.
        task_id: String,
        /// Current draft.
        task_data: TaskData,
    },
    /// Ask the host to push a fresh snapshot.
    #[serde(rename = "kanbn.updateMe")]
    UpdateMe,
}

impl OutboundMessage {
    /// Returns the host command name.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::Create { .. } => "kanbn.create",
            Self::Update { .. } => "kanbn.update",
            Self::Delete { .. } => "kanbn.delete",
            Self::Archive { .. } => "kanbn.archive",
            Self::UpdateMe => "kanbn.updateMe",
        }
    }

    /// Returns the task payload, if the message carries one.
    #[must_use]
    pub const fn task_data(&self) -> Option<&TaskData> {
        match self {
            Self::Create { task_data, .. }
            | Self::Update { task_data, .. }
            | Self::Delete { task_data, .. }
            | Self::Archive { task_data, .. } => Some(task_data),
            Self::UpdateMe => None,
        }
    }

    /// Serializes the message to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the serializer error when a payload value cannot be encoded.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
