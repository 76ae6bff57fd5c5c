//! Shared test helpers for in-memory editor integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use kanbn_task_editor::editor::{
    adapters::memory::{InMemoryPanelStateStore, RecordingHostSink},
    config::EditorConfig,
    domain::HostSnapshot,
    services::EditorController,
};
use mockable::Clock;
use rstest::fixture;
use serde_json::{Value, json};

/// Clock pinned to noon UTC on 2024-06-15.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Controller wired to in-memory adapters.
pub type TestController = EditorController<RecordingHostSink, InMemoryPanelStateStore, FixedClock>;

/// Controller plus handles on its adapters.
pub struct Panel {
    pub sink: RecordingHostSink,
    pub store: InMemoryPanelStateStore,
    pub controller: TestController,
}

impl Panel {
    /// Opens a panel over `store`, as a reloaded panel would.
    #[must_use]
    pub fn open(store: InMemoryPanelStateStore) -> Self {
        let sink = RecordingHostSink::new();
        let controller = EditorController::new(
            Arc::new(sink.clone()),
            Arc::new(store.clone()),
            Arc::new(FixedClock::default()),
            EditorConfig::default().with_default_comment_author("tester"),
        );
        Self {
            sink,
            store,
            controller,
        }
    }
}

/// Provides a fresh panel with an empty state store.
#[fixture]
pub fn panel() -> Panel {
    Panel::open(InMemoryPanelStateStore::new())
}

/// Task record of the board as the host serializes it.
#[must_use]
pub fn host_task(id: &str, uuid: &str, name: &str) -> Value {
    json!({
        "uuid": uuid,
        "id": id,
        "name": name,
        "description": "",
        "column": "Todo",
        "metadata": {
            "created": "2024-01-10T08:00:00.000Z",
            "due": "2024-07-01T00:00:00.000Z",
            "tags": ["docs"],
            "Review": "2024-05-06T00:00:00.000Z"
        },
        "relations": [],
        "subTasks": [ { "text": "outline", "completed": false } ],
        "comments": []
    })
}

/// Builds a raw host frame, editing `task` or creating when it is null.
#[must_use]
pub fn board_frame(task: Value) -> String {
    json!({
        "type": "task",
        "task": task,
        "tasks": [
            host_task("write-docs", "u-1", "Write docs"),
            host_task("ship-release", "u-2", "Ship release")
        ],
        "columnName": "Todo",
        "index": { "columns": { "Backlog": [], "Todo": [], "Done": [] } },
        "customFields": [
            { "name": "Review", "type": "date" },
            { "name": "Points", "type": "number", "default": 1 }
        ],
        "dateFormat": "isoDate"
    })
    .to_string()
}

/// Decodes a raw host frame.
///
/// # Errors
///
/// Returns an error when the frame is not a snapshot.
pub fn decode(frame: &str) -> Result<HostSnapshot, eyre::Report> {
    HostSnapshot::from_json(frame).map_err(|err| eyre::eyre!("decode frame: {err}"))
}
