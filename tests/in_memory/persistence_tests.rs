//! Panel state restoration across reloads.

use kanbn_task_editor::editor::{
    adapters::memory::InMemoryPanelStateStore,
    domain::{DraftEdit, PanelState},
};
use rstest::rstest;
use serde_json::Value;

use super::helpers::{Panel, board_frame, decode, host_task, panel};

#[rstest]
fn reloaded_panel_resumes_draft(mut panel: Panel) -> Result<(), eyre::Report> {
    panel.controller.on_message(decode(&board_frame(host_task(
        "write-docs",
        "u-1",
        "Write docs",
    )))?)?;
    panel
        .controller
        .edit(DraftEdit::SetAssigned("casey".to_owned()))?;
    panel.controller.set_editing_description(true)?;

    let reloaded = Panel::open(panel.store.clone());

    let working = reloaded
        .controller
        .working_state()
        .ok_or_else(|| eyre::eyre!("restored state should be ready"))?;
    eyre::ensure!(working.draft().metadata().assigned() == "casey", "draft kept");
    eyre::ensure!(working.ui().editing_description, "ui flags kept");
    eyre::ensure!(reloaded.controller.is_dirty(), "dirty flag survives reload");
    Ok(())
}

#[rstest]
fn first_run_starts_uninitialized(panel: Panel) {
    assert_eq!(panel.controller.state(), &PanelState::Uninitialized);
    assert!(panel.store.raw().is_none());
}

#[rstest]
fn corrupt_state_is_discarded() {
    let reloaded = Panel::open(InMemoryPanelStateStore::with_raw(r#"{"status":"exploded"}"#));
    assert_eq!(reloaded.controller.state(), &PanelState::Uninitialized);
}

#[rstest]
fn saved_state_is_tagged_json(mut panel: Panel) -> Result<(), eyre::Report> {
    panel
        .controller
        .on_message(decode(&board_frame(Value::Null))?)?;

    let raw = panel
        .store
        .raw()
        .ok_or_else(|| eyre::eyre!("state should be saved"))?;
    let saved: Value = serde_json::from_str(&raw)?;

    eyre::ensure!(
        saved.get("status").and_then(Value::as_str) == Some("ready"),
        "unexpected saved state {saved}"
    );
    eyre::ensure!(panel.store.save_count() == 1, "one save per mutation");
    Ok(())
}
