//! When steps for task editor BDD scenarios.

use super::world::{EditorWorld, load_board};
use eyre::WrapErr;
use kanbn_task_editor::editor::domain::DraftEdit;
use rstest_bdd_macros::when;

#[when(r#"the user renames the task to "{name}""#)]
fn rename_task(world: &mut EditorWorld, name: String) -> Result<(), eyre::Report> {
    world
        .controller
        .edit(DraftEdit::SetName(name))
        .wrap_err("rename draft")
}

fn push_tags(world: &mut EditorWorld, tags: [String; 2]) -> Result<(), eyre::Report> {
    for tag in tags {
        world
            .controller
            .edit(DraftEdit::AddTag(tag))
            .wrap_err("add tag")?;
    }
    Ok(())
}

#[when(r#"the user adds the tags "{first}" and "{second}""#)]
fn add_tags(world: &mut EditorWorld, first: String, second: String) -> Result<(), eyre::Report> {
    push_tags(world, [first, second])
}

#[when(r#"the user adds an empty tag followed by "{tag}""#)]
fn add_empty_then_tag(world: &mut EditorWorld, tag: String) -> Result<(), eyre::Report> {
    push_tags(world, [String::new(), tag])
}

#[when("the user submits the draft")]
fn submit_draft(world: &mut EditorWorld) -> Result<(), eyre::Report> {
    let outcome = world.controller.submit().wrap_err("submit draft")?;
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the user deletes the task")]
fn delete_task(world: &mut EditorWorld) -> Result<(), eyre::Report> {
    world.controller.delete().wrap_err("delete task")
}

#[when(r#"the host loads task "{loaded}" on a board that also has "{other}""#)]
fn host_pushes_snapshot(
    world: &mut EditorWorld,
    loaded: String,
    other: String,
) -> Result<(), eyre::Report> {
    load_board(world, &loaded, &other)
}
