//! Then steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use planboard::task::{domain::TaskStatus, ports::TaskStore};
use rstest_bdd_macros::then;

#[then(r#"the task is in column "{column}" on the board"#)]
fn task_on_board_column(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(column.as_str())?;
    let task_id = world.task_id()?;
    let board = world.sync.coordinator().board();

    eyre::ensure!(
        board.column(status).iter().any(|task| task.id() == task_id),
        "task {task_id} is not in the {status} column"
    );
    Ok(())
}

#[then(r#"the stored task is in column "{column}""#)]
fn stored_task_in_column(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(column.as_str())?;
    let task_id = world.task_id()?;
    let owner = world
        .owner
        .ok_or_else(|| eyre::eyre!("missing signed-in user"))?;

    let stored = run_async(world.tasks.list_tasks(owner))?;
    let task = stored
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| eyre::eyre!("task {task_id} is not stored"))?;
    eyre::ensure!(
        task.status() == expected,
        "expected stored status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("a status write is issued")]
fn status_write_issued(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.write_issued == Some(true),
        "expected the drop to issue a status write"
    );
    Ok(())
}

#[then("no status write is issued")]
fn no_status_write_issued(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.write_issued == Some(false),
        "expected the drop to issue no status write"
    );
    Ok(())
}
