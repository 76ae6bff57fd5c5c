//! Application services for the editor panel.

mod controller;
mod summary;

pub use controller::{ControllerError, ControllerResult, EditorController, SubmitOutcome};
pub use summary::EditorSummary;
