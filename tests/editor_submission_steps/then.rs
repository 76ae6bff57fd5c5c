//! Then steps for task editor BDD scenarios.

use super::world::EditorWorld;
use kanbn_task_editor::editor::{
    domain::OutboundMessage, services::SubmitOutcome, validation::ValidationReport,
};
use rstest_bdd_macros::then;

fn rejection(world: &EditorWorld) -> Result<&ValidationReport, eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(SubmitOutcome::Rejected(report)) => Ok(report),
        other => Err(eyre::eyre!("expected a rejected submission, found {other:?}")),
    }
}

fn ensure_count(world: &EditorWorld, count: usize, command: &str) -> Result<(), eyre::Report> {
    let posted = world.sink.count_of(command);
    eyre::ensure!(posted == count, "expected {count} {command}, found {posted}");
    Ok(())
}

#[then(r#"exactly {count:usize} "{command}" message is posted"#)]
fn exactly_one_message(
    world: &EditorWorld,
    count: usize,
    command: String,
) -> Result<(), eyre::Report> {
    ensure_count(world, count, &command)
}

#[then(r#"exactly {count:usize} "{command}" messages are posted"#)]
fn exactly_n_messages(
    world: &EditorWorld,
    count: usize,
    command: String,
) -> Result<(), eyre::Report> {
    ensure_count(world, count, &command)
}

#[then("the draft is no longer dirty")]
fn draft_clean(world: &EditorWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.controller.is_dirty(), "draft should be committed");
    Ok(())
}

#[then(r#"the posted task has id "{id}""#)]
fn posted_task_id(world: &EditorWorld, id: String) -> Result<(), eyre::Report> {
    let messages = world.sink.messages();
    let data = messages
        .last()
        .and_then(OutboundMessage::task_data)
        .ok_or_else(|| eyre::eyre!("no task message was posted"))?;
    eyre::ensure!(data.id == id, "expected id {id}, found {}", data.id);
    Ok(())
}

#[then("the submission is rejected with a tag error at index {index:usize} only")]
fn tag_error_only(world: &EditorWorld, index: usize) -> Result<(), eyre::Report> {
    let report = rejection(world)?;
    let indices: Vec<usize> = report.tag_error_indices().collect();
    eyre::ensure!(indices == [index], "unexpected tag errors {indices:?}");
    eyre::ensure!(report.name_error().is_none(), "name should be valid");
    Ok(())
}

#[then(r#"the submission is rejected with the name error "{message}""#)]
fn name_error(world: &EditorWorld, message: String) -> Result<(), eyre::Report> {
    let report = rejection(world)?;
    eyre::ensure!(
        report.name_error() == Some(message.as_str()),
        "unexpected name error {:?}",
        report.name_error()
    );
    Ok(())
}

#[then("no task message is posted")]
fn nothing_posted(world: &EditorWorld) -> Result<(), eyre::Report> {
    let messages = world.sink.messages();
    eyre::ensure!(messages.is_empty(), "unexpected messages {messages:?}");
    Ok(())
}

#[then("the draft has no tags")]
fn draft_without_tags(world: &EditorWorld) -> Result<(), eyre::Report> {
    let working = world
        .controller
        .working_state()
        .ok_or_else(|| eyre::eyre!("controller should be ready"))?;
    let tags = working.draft().metadata().tags();
    eyre::ensure!(tags.is_empty(), "leftover tags {tags:?}");
    Ok(())
}

#[then("the description is still in edit mode")]
fn description_edit_mode(world: &EditorWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.controller.state().ui().editing_description,
        "description edit mode should survive the snapshot"
    );
    Ok(())
}

#[then(r#"the board still lists "{id}""#)]
fn board_lists(world: &EditorWorld, id: String) -> Result<(), eyre::Report> {
    let working = world
        .controller
        .working_state()
        .ok_or_else(|| eyre::eyre!("controller should be ready"))?;
    eyre::ensure!(working.tasks().contains(&id), "task {id} should remain known");
    Ok(())
}
