//! When steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use pegboard::board::domain::{Position, TaskId};
use pegboard::board::services::{
    ListPositionEntry, MoveTaskRequest, ReorderListsRequest, ReorderTasksRequest,
    TaskPositionEntry,
};
use rstest_bdd_macros::when;

fn list_entries(world: &DragWorld, titles: &[&str]) -> Result<Vec<ListPositionEntry>, eyre::Report> {
    titles
        .iter()
        .map(|title| {
            Ok(ListPositionEntry {
                list_id: world.list_named(title)?,
                position: Position::ZERO,
            })
        })
        .collect()
}

fn task_entries(world: &DragWorld, titles: &[&str]) -> Result<Vec<TaskPositionEntry>, eyre::Report> {
    titles
        .iter()
        .map(|title| {
            Ok(TaskPositionEntry {
                task_id: world.task_named(title)?,
                position: Position::ZERO,
            })
        })
        .collect()
}

#[when(r#"the lists are reordered to "{first}", "{second}""#)]
fn reorder_lists(
    world: &mut DragWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let positions = list_entries(world, &[&first, &second])?;
    let result = run_async(world.lists.reorder_lists(
        world.user,
        board,
        ReorderListsRequest { positions },
    ));
    world.last_list_reorder = Some(result);
    Ok(())
}

#[when(r#"the tasks are reordered to "{first}", "{second}""#)]
fn reorder_tasks(
    world: &mut DragWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let list = world
        .list_names
        .values()
        .next()
        .copied()
        .ok_or_else(|| eyre::eyre!("no list seeded in scenario world"))?;
    let positions = task_entries(world, &[&first, &second])?;
    let result = run_async(world.tasks.reorder_tasks(
        world.user,
        board,
        list,
        ReorderTasksRequest { positions },
    ));
    world.last_task_reorder = Some(result);
    Ok(())
}

#[when("the tasks are reordered with an unknown identifier")]
fn reorder_tasks_with_unknown_identifier(world: &mut DragWorld) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let list = world
        .list_names
        .values()
        .next()
        .copied()
        .ok_or_else(|| eyre::eyre!("no list seeded in scenario world"))?;
    let positions = vec![TaskPositionEntry {
        task_id: TaskId::new(),
        position: Position::ZERO,
    }];
    let result = run_async(world.tasks.reorder_tasks(
        world.user,
        board,
        list,
        ReorderTasksRequest { positions },
    ));
    world.last_task_reorder = Some(result);
    Ok(())
}

#[when(r#"the task "{task}" is moved from "{source}" to "{target}""#)]
fn move_task(
    world: &mut DragWorld,
    task: String,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let moved = world.task_named(&task)?;
    let request = MoveTaskRequest {
        from_list_id: world.list_named(&source)?,
        to_list_id: world.list_named(&target)?,
        position: None,
    };
    let result = run_async(world.tasks.move_task(world.user, board, moved, request));
    world.last_move = Some(result);
    Ok(())
}
