//! Drag-reorder resolution over the in-memory store.

use crate::in_memory::helpers::{Stack, seed_board, seed_list, seed_task, stack};
use pegboard::board::domain::{List, ListId, Position, Task, TaskId};
use pegboard::board::services::{
    ListPositionEntry, ReorderListsRequest, ReorderTasksRequest, TaskPositionEntry,
};
use rstest::rstest;

fn list_request(order: &[ListId]) -> ReorderListsRequest {
    ReorderListsRequest {
        positions: order
            .iter()
            .map(|id| ListPositionEntry {
                list_id: *id,
                position: Position::ZERO,
            })
            .collect(),
    }
}

fn task_request(order: &[TaskId]) -> ReorderTasksRequest {
    ReorderTasksRequest {
        positions: order
            .iter()
            .map(|id| TaskPositionEntry {
                task_id: *id,
                position: Position::ZERO,
            })
            .collect(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_full_list_permutation_round_trips_through_detail(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let a = seed_list(&stack, board, "A").await?.id();
    let b = seed_list(&stack, board, "B").await?.id();
    let c = seed_list(&stack, board, "C").await?.id();
    let permutation = vec![c, a, b];

    stack
        .lists
        .reorder_lists(stack.user, board, list_request(&permutation))
        .await?;

    let detail = stack.boards.board_detail(stack.user, board).await?;
    let ids: Vec<ListId> = detail.lists.iter().map(|entry| entry.list.id()).collect();
    assert_eq!(ids, permutation);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn swapping_two_lists_renumbers_from_zero(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let first = seed_list(&stack, board, "Todo").await?;
    let second = seed_list(&stack, board, "Doing").await?;
    assert_eq!(first.position(), Position::new(0));
    assert_eq!(second.position(), Position::new(1));

    let reordered = stack
        .lists
        .reorder_lists(stack.user, board, list_request(&[second.id(), first.id()]))
        .await?;

    let ids: Vec<ListId> = reordered.iter().map(List::id).collect();
    let positions: Vec<Position> = reordered.iter().map(List::position).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
    assert_eq!(positions, vec![Position::new(0), Position::new(1)]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn swapping_two_tasks_renumbers_with_gaps(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let list = seed_list(&stack, board, "Todo").await?.id();
    let first = seed_task(&stack, board, list, "Draft").await?;
    let second = seed_task(&stack, board, list, "Review").await?;
    assert_eq!(first.position(), Position::new(0));
    assert_eq!(second.position(), Position::new(1000));

    let reordered = stack
        .tasks
        .reorder_tasks(
            stack.user,
            board,
            list,
            task_request(&[second.id(), first.id()]),
        )
        .await?;

    let ids: Vec<TaskId> = reordered.iter().map(Task::id).collect();
    let positions: Vec<Position> = reordered.iter().map(Task::position).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
    assert_eq!(positions, vec![Position::new(1000), Position::new(2000)]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_full_task_permutation_round_trips_through_detail(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let list = seed_list(&stack, board, "Todo").await?.id();
    let mut created = Vec::new();
    for title in ["One", "Two", "Three", "Four"] {
        created.push(seed_task(&stack, board, list, title).await?.id());
    }
    let permutation = vec![created[2], created[0], created[3], created[1]];

    stack
        .tasks
        .reorder_tasks(stack.user, board, list, task_request(&permutation))
        .await?;

    let detail = stack.boards.board_detail(stack.user, board).await?;
    let ids: Vec<TaskId> = detail.lists[0].tasks.iter().map(|task| task.id()).collect();
    assert_eq!(ids, permutation);
    Ok(())
}
