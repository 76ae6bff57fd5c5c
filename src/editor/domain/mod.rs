//! Domain model for the task editor panel.
//!
//! Pure types and functions only: identifier derivation, date handling,
//! the host wire model, custom field typing, the editable draft and the
//! panel working state. Nothing here performs I/O.

mod custom_field;
mod dates;
mod display_format;
mod draft;
mod error;
mod ids;
mod message;
mod slug;
mod state;
mod task;

pub use custom_field::{
    CustomField, CustomFieldDefinition, CustomFieldKind, CustomFieldValue,
    RESERVED_METADATA_KEYS, initial_custom_fields, write_custom_fields,
};
pub use dates::{
    EDITABLE_DATE_FORMAT, editable_date_from_value, host_timestamp, is_overdue, is_overdue_at,
    parse_timestamp, to_editable_date,
};
pub use display_format::{DEFAULT_MASK, DisplayDateFormat};
pub use draft::{DateField, DraftEdit, DraftMetadata, TaskDraft};
pub use error::{DraftCollection, EditorDomainError};
pub use ids::PanelId;
pub use message::{BoardIndex, HostSnapshot, OutboundMessage, TaskData, TaskDataMetadata};
pub use slug::derive_slug;
pub use state::{EditorMode, PanelState, TaskIndex, UiModes, WorkingState};
pub use task::{Comment, Relation, SubTask, Task, TaskMetadata};
