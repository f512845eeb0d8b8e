//! Given steps for drag-and-drop BDD scenarios.

use super::world::{DragWorld, run_async};
use eyre::WrapErr;
use pegboard::board::services::{CreateBoardRequest, CreateListRequest, CreateTaskRequest};
use rstest_bdd_macros::given;

fn seed_board(world: &mut DragWorld, name: &str) -> Result<(), eyre::Report> {
    let board = run_async(world.boards.create_board(
        world.user,
        CreateBoardRequest {
            name: name.to_owned(),
        },
    ))
    .wrap_err("seed scenario board")?;
    world.board = Some(board.id());
    Ok(())
}

fn seed_list(world: &mut DragWorld, title: &str) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let list = run_async(world.lists.create_list(
        world.user,
        board,
        CreateListRequest {
            title: title.to_owned(),
        },
    ))
    .wrap_err("seed scenario list")?;
    world.list_names.insert(title.to_owned(), list.id());
    Ok(())
}

fn seed_task(world: &mut DragWorld, list_title: &str, title: &str) -> Result<(), eyre::Report> {
    let board = world.board_id()?;
    let list = world.list_named(list_title)?;
    let task = run_async(world.tasks.create_task(
        world.user,
        board,
        list,
        CreateTaskRequest {
            title: title.to_owned(),
        },
    ))
    .wrap_err("seed scenario task")?;
    world.task_names.insert(title.to_owned(), task.id());
    Ok(())
}

#[given(r#"a board "{name}" with lists "{first}" and "{second}""#)]
fn board_with_two_lists(
    world: &mut DragWorld,
    name: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    seed_board(world, &name)?;
    seed_list(world, &first)?;
    seed_list(world, &second)
}

#[given(r#"a board "{name}" with a list "{title}""#)]
fn board_with_one_list(
    world: &mut DragWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    seed_board(world, &name)?;
    seed_list(world, &title)
}

#[given(r#"the list has tasks "{first}" and "{second}""#)]
fn list_with_two_tasks(
    world: &mut DragWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let list_title = world
        .list_names
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| eyre::eyre!("no list seeded in scenario world"))?;
    seed_task(world, &list_title, &first)?;
    seed_task(world, &list_title, &second)
}

#[given(r#"the list "{list}" has a task "{title}""#)]
fn named_list_with_task(
    world: &mut DragWorld,
    list: String,
    title: String,
) -> Result<(), eyre::Report> {
    seed_task(world, &list, &title)
}
