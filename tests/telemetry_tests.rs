//! Tracing subscriber installation tests.

use kanbn_task_editor::telemetry::init_tracing;
use rstest::rstest;

#[rstest]
fn repeated_installation_is_tolerated() -> Result<(), eyre::Report> {
    init_tracing("kanbn_task_editor=debug")?;
    init_tracing("kanbn_task_editor=debug")?;
    Ok(())
}
