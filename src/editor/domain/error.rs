//! Error types for draft edits and host boundary decoding.

use std::fmt;
use thiserror::Error;

/// Ordered collections inside a task draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftCollection {
    /// Tag list.
    Tags,
    /// Sub-task list.
    SubTasks,
    /// Relation list.
    Relations,
    /// Comment list.
    Comments,
}

impl fmt::Display for DraftCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Tags => "tags",
            Self::SubTasks => "sub-tasks",
            Self::Relations => "relations",
            Self::Comments => "comments",
        };
        f.write_str(label)
    }
}

/// Errors returned while editing a draft or decoding host input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorDomainError {
    /// An edit addressed an entry that does not exist.
    #[error("no entry at index {index} in {collection} (length {len})")]
    IndexOutOfRange {
        /// Collection the edit targeted.
        collection: DraftCollection,
        /// Requested index.
        index: usize,
        /// Current collection length.
        len: usize,
    },

    /// An edit addressed a custom field the board does not declare.
    #[error("unknown custom field: {0}")]
    UnknownCustomField(String),

    /// An inbound frame is not a host snapshot.
    #[error("malformed host snapshot: {0}")]
    MalformedSnapshot(String),
}
