//! Sparse validation report mirroring the draft shape.

use serde::Serialize;
use std::collections::BTreeMap;

/// Error attached to one entry of an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemError {
    /// Message for the entry's text field.
    pub text: String,
}

/// Errors inside the draft metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataErrors {
    /// Tag errors keyed by tag position.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<usize, String>,
}

impl MetadataErrors {
    /// Returns `true` when no metadata field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Validation outcome for a draft.
///
/// Only fields with errors are present; an empty report means the draft is
/// valid. Serializes to the same sparse shape, keyed like the draft:
///
/// ```json
/// { "name": "...", "metadata": { "tags": { "0": "..." } }, "subTasks": { "2": { "text": "..." } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "MetadataErrors::is_empty")]
    metadata: MetadataErrors,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    sub_tasks: BTreeMap<usize, ItemError>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    comments: BTreeMap<usize, ItemError>,
}

impl ValidationReport {
    /// Returns `true` when no rule fired.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.metadata.is_empty()
            && self.sub_tasks.is_empty()
            && self.comments.is_empty()
    }

    /// Error on the name field.
    #[must_use]
    pub fn name_error(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Error on the tag at `index`.
    #[must_use]
    pub fn tag_error(&self, index: usize) -> Option<&str> {
        self.metadata.tags.get(&index).map(String::as_str)
    }

    /// Error on the sub-task at `index`.
    #[must_use]
    pub fn sub_task_error(&self, index: usize) -> Option<&str> {
        self.sub_tasks.get(&index).map(|error| error.text.as_str())
    }

    /// Error on the comment at `index`.
    #[must_use]
    pub fn comment_error(&self, index: usize) -> Option<&str> {
        self.comments.get(&index).map(|error| error.text.as_str())
    }

    /// Positions of tags with errors, ascending.
    pub fn tag_error_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.metadata.tags.keys().copied()
    }

    /// Total number of field errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        usize::from(self.name.is_some())
            + self.metadata.tags.len()
            + self.sub_tasks.len()
            + self.comments.len()
    }

    pub(crate) fn set_name_error(&mut self, message: &str) {
        self.name = Some(message.to_owned());
    }

    pub(crate) fn add_tag_error(&mut self, index: usize, message: &str) {
        self.metadata.tags.insert(index, message.to_owned());
    }

    pub(crate) fn add_sub_task_error(&mut self, index: usize, message: &str) {
        self.sub_tasks.insert(
            index,
            ItemError {
                text: message.to_owned(),
            },
        );
    }

    pub(crate) fn add_comment_error(&mut self, index: usize, message: &str) {
        self.comments.insert(
            index,
            ItemError {
                text: message.to_owned(),
            },
        );
    }
}
