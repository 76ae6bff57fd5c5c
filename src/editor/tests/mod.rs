//! Unit tests for the task editor.


use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::editor::domain::{Task, TaskMetadata};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub(super) fn at(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixed instant");
        Self(instant)
    }

    pub(super) const fn instant(&self) -> DateTime<Utc> {
        self.0
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

pub(super) fn task(id: &str, uuid: Option<&str>) -> Task {
    Task {
        uuid: uuid.map(str::to_owned),
        id: id.to_owned(),
        name: id.to_owned(),
        column: "Backlog".to_owned(),
        metadata: TaskMetadata {
            created: Some("2024-01-10T08:00:00.000Z".to_owned()),
            ..TaskMetadata::default()
        },
        ..Task::default()
    }
}
