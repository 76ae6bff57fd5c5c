//! End-to-end controller flows over in-memory adapters.

use kanbn_task_editor::editor::{
    adapters::memory::ScriptedHostSource,
    domain::{DraftEdit, EditorMode, OutboundMessage},
    services::SubmitOutcome,
};
use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{Panel, board_frame, decode, host_task, panel};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn run_applies_every_scripted_snapshot(mut panel: Panel) -> Result<(), eyre::Report> {
    let mut source = ScriptedHostSource::new([
        decode(&board_frame(Value::Null))?,
        decode(&board_frame(host_task("write-docs", "u-1", "Write docs")))?,
    ]);

    let applied = panel.controller.run(&mut source).await;

    eyre::ensure!(applied == 2, "expected two snapshots, applied {applied}");
    eyre::ensure!(source.remaining() == 0, "source should be drained");
    let working = panel
        .controller
        .working_state()
        .ok_or_else(|| eyre::eyre!("controller should be ready"))?;
    eyre::ensure!(working.mode() == EditorMode::Edit, "last snapshot edits");
    eyre::ensure!(working.draft().id() == "write-docs", "draft follows last snapshot");
    Ok(())
}

#[rstest]
fn creating_a_task_posts_full_payload(mut panel: Panel) -> Result<(), eyre::Report> {
    panel.controller.start()?;
    panel.controller.on_message(decode(&board_frame(Value::Null))?)?;
    for edit in [
        DraftEdit::SetName("Plan sprint".to_owned()),
        DraftEdit::AddTag("planning".to_owned()),
        DraftEdit::SetCustomField {
            name: "Points".to_owned(),
            value: json!("5"),
        },
        DraftEdit::AddSubTask,
        DraftEdit::SetSubTaskText {
            index: 0,
            text: "collect estimates".to_owned(),
        },
    ] {
        panel.controller.edit(edit)?;
    }

    let outcome = panel.controller.submit()?;

    eyre::ensure!(outcome.is_sent(), "valid draft should be sent");
    let commands: Vec<&str> = panel
        .sink
        .messages()
        .iter()
        .map(OutboundMessage::command)
        .collect();
    eyre::ensure!(
        commands == ["kanbn.updateMe", "kanbn.create"],
        "unexpected commands {commands:?}"
    );

    let wire: Value = serde_json::from_str(
        &panel
            .sink
            .messages()
            .last()
            .ok_or_else(|| eyre::eyre!("missing create message"))?
            .to_json()?,
    )?;
    let data = wire
        .get("taskData")
        .ok_or_else(|| eyre::eyre!("create carries taskData"))?;
    eyre::ensure!(data.get("id") == Some(&json!("plan-sprint")), "derived id");
    eyre::ensure!(data.get("column") == Some(&json!("Todo")), "snapshot column");
    let metadata = data
        .get("metadata")
        .ok_or_else(|| eyre::eyre!("taskData carries metadata"))?;
    eyre::ensure!(metadata.get("Points") == Some(&json!(5.0)), "coerced number");
    eyre::ensure!(metadata.get("Review") == Some(&Value::Null), "unset stays null");
    eyre::ensure!(
        metadata.get("created") == Some(&json!("2024-06-15T12:00:00.000Z")),
        "created from clock"
    );
    eyre::ensure!(
        wire.get("customFields")
            .and_then(Value::as_array)
            .is_some_and(|fields| fields.len() == 2),
        "definitions are passed back"
    );
    Ok(())
}

#[rstest]
fn renaming_onto_another_task_is_rejected(mut panel: Panel) -> Result<(), eyre::Report> {
    panel.controller.on_message(decode(&board_frame(host_task(
        "write-docs",
        "u-1",
        "Write docs",
    )))?)?;
    panel
        .controller
        .edit(DraftEdit::SetName("Ship release".to_owned()))?;

    let outcome = panel.controller.submit()?;

    let SubmitOutcome::Rejected(report) = outcome else {
        return Err(eyre::eyre!("duplicate identifier should be rejected"));
    };
    eyre::ensure!(
        report.name_error() == Some("There is already a task with the same name or id."),
        "unexpected name error {:?}",
        report.name_error()
    );
    eyre::ensure!(panel.sink.messages().is_empty(), "nothing is posted");
    Ok(())
}

#[rstest]
fn update_round_trips_date_custom_field(mut panel: Panel) -> Result<(), eyre::Report> {
    panel.controller.on_message(decode(&board_frame(host_task(
        "write-docs",
        "u-1",
        "Write docs",
    )))?)?;
    panel
        .controller
        .edit(DraftEdit::SetDescription("now with examples".to_owned()))?;

    panel.controller.submit()?;

    let messages = panel.sink.messages();
    let Some(OutboundMessage::Update {
        task_id, task_data, ..
    }) = messages.first()
    else {
        return Err(eyre::eyre!("expected one update message"));
    };
    eyre::ensure!(task_id == "write-docs", "task id of loaded task");
    eyre::ensure!(
        task_data.metadata.custom.get("Review") == Some(&json!("2024-05-06")),
        "date custom field keeps its normalized value"
    );
    eyre::ensure!(task_data.metadata.due == "2024-07-01", "due normalized");
    eyre::ensure!(!panel.controller.is_dirty(), "submit commits the draft");
    Ok(())
}

#[rstest]
fn summary_reflects_board_settings(mut panel: Panel) -> Result<(), eyre::Report> {
    panel.controller.on_message(decode(&board_frame(host_task(
        "write-docs",
        "u-1",
        "Write docs",
    )))?)?;

    let summary = panel
        .controller
        .summary()
        .ok_or_else(|| eyre::eyre!("summary available once ready"))?;

    eyre::ensure!(summary.heading() == "Update task", "edit heading");
    eyre::ensure!(summary.created() == Some("Created 2024-01-10"), "created line");
    eyre::ensure!(!summary.is_overdue(), "due date lies ahead");
    eyre::ensure!(
        summary.column_options() == ["Backlog", "Todo", "Done"],
        "columns keep board order"
    );
    Ok(())
}
