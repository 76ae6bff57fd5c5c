//! Shared world state for task editor BDD scenarios.

use std::sync::Arc;

use kanbn_task_editor::editor::{
    adapters::memory::{InMemoryPanelStateStore, RecordingHostSink},
    config::EditorConfig,
    domain::{HostSnapshot, Task, derive_slug},
    services::{EditorController, SubmitOutcome},
};
use mockable::DefaultClock;
use eyre::WrapErr;
use rstest::fixture;

/// Controller type used by the BDD world.
pub type TestController =
    EditorController<RecordingHostSink, InMemoryPanelStateStore, DefaultClock>;

/// Scenario world for editor behaviour tests.
pub struct EditorWorld {
    pub sink: RecordingHostSink,
    pub controller: TestController,
    pub last_outcome: Option<SubmitOutcome>,
}

impl EditorWorld {
    /// Creates a world with a fresh, uninitialized panel.
    #[must_use]
    pub fn new() -> Self {
        let sink = RecordingHostSink::new();
        let controller = EditorController::new(
            Arc::new(sink.clone()),
            Arc::new(InMemoryPanelStateStore::new()),
            Arc::new(DefaultClock),
            EditorConfig::default(),
        );
        Self {
            sink,
            controller,
            last_outcome: None,
        }
    }
}

impl Default for EditorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> EditorWorld {
    EditorWorld::default()
}

/// Builds a board task with an identifier derived from `name`.
#[must_use]
pub fn board_task(name: &str, uuid: &str) -> Task {
    Task {
        uuid: Some(uuid.to_owned()),
        id: derive_slug(name),
        name: name.to_owned(),
        column: "Todo".to_owned(),
        ..Task::default()
    }
}

/// Builds a snapshot for the given loaded task and board.
#[must_use]
pub fn snapshot(task: Option<Task>, tasks: Vec<Task>, column: &str) -> HostSnapshot {
    HostSnapshot {
        kind: "task".to_owned(),
        task,
        tasks,
        column_name: column.to_owned(),
        ..HostSnapshot::default()
    }
}

/// Pushes a snapshot loading `loaded` on a board holding both tasks.
///
/// # Errors
///
/// Returns an error when the controller cannot persist the new state.
pub fn load_board(world: &mut EditorWorld, loaded: &str, other: &str) -> Result<(), eyre::Report> {
    let loaded_task = board_task(loaded, &format!("uuid-{loaded}"));
    let other_task = board_task(other, &format!("uuid-{other}"));
    world
        .controller
        .on_message(snapshot(
            Some(loaded_task.clone()),
            vec![loaded_task, other_task],
            "Todo",
        ))
        .wrap_err("apply host snapshot")
}
