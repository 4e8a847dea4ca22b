//! When steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use planboard::{
    client::{DragEnd, DropTarget},
    task::domain::TaskId,
};
use rstest_bdd_macros::when;

fn release(world: &mut BoardWorld, over: Option<DropTarget>) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let pending = world
        .sync
        .coordinator()
        .handle_drag_end(DragEnd::new(task_id, over))?;
    world.write_issued = Some(pending.is_some());
    if let Some(write) = pending {
        run_async(write.settled()).wrap_err("status write after drop")?;
    }
    Ok(())
}

#[when(r#"the card is dropped on column "{column}""#)]
fn dropped_on_column(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let over = DropTarget::parse_column(&column)?;
    release(world, Some(over))
}

#[when("the card is dropped on another card")]
fn dropped_on_another_card(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    release(world, Some(DropTarget::Task(TaskId::new())))
}

#[when("the card is released outside the board")]
fn released_outside_the_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    release(world, None)
}
