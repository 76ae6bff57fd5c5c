//! Given steps for task editor BDD scenarios.

use super::world::{EditorWorld, load_board, snapshot};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the host loads task "{loaded}" on a board that also has "{other}""#)]
fn host_loads_task(
    world: &mut EditorWorld,
    loaded: String,
    other: String,
) -> Result<(), eyre::Report> {
    load_board(world, &loaded, &other)
}

#[given(r#"the host opens the editor to create a task in column "{column}""#)]
fn host_opens_create(world: &mut EditorWorld, column: String) -> Result<(), eyre::Report> {
    world
        .controller
        .on_message(snapshot(None, Vec::new(), &column))
        .wrap_err("apply create snapshot")
}

#[given("the user is editing the description")]
fn editing_description(world: &mut EditorWorld) -> Result<(), eyre::Report> {
    world
        .controller
        .set_editing_description(true)
        .wrap_err("enter description edit mode")
}
