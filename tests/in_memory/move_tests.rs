//! Cross-list task movement over the in-memory store.

use crate::in_memory::helpers::{Stack, seed_board, seed_list, seed_task, stack};
use pegboard::board::domain::{Position, TaskId, UserId};
use pegboard::board::services::{BoardServiceError, MoveTaskRequest};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_moved_task_changes_lists_in_the_detail_view(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let todo = seed_list(&stack, board, "Todo").await?.id();
    let doing = seed_list(&stack, board, "Doing").await?.id();
    let task = seed_task(&stack, board, todo, "Draft").await?.id();

    let moved = stack
        .tasks
        .move_task(
            stack.user,
            board,
            task,
            MoveTaskRequest {
                from_list_id: todo,
                to_list_id: doing,
                position: None,
            },
        )
        .await?;

    assert_eq!(moved.list_id(), doing);
    assert_eq!(moved.position(), Position::ZERO);

    let detail = stack.boards.board_detail(stack.user, board).await?;
    let todo_tasks: Vec<TaskId> = detail.lists[0].tasks.iter().map(|entry| entry.id()).collect();
    let doing_tasks: Vec<TaskId> = detail.lists[1].tasks.iter().map(|entry| entry.id()).collect();
    assert!(todo_tasks.is_empty());
    assert_eq!(doing_tasks, vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_rejected_move_changes_nothing(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let todo = seed_list(&stack, board, "Todo").await?.id();
    let doing = seed_list(&stack, board, "Doing").await?.id();
    let other = seed_list(&stack, board, "Other").await?.id();
    let task = seed_task(&stack, board, todo, "Draft").await?.id();

    // Claims the wrong source list.
    let result = stack
        .tasks
        .move_task(
            stack.user,
            board,
            task,
            MoveTaskRequest {
                from_list_id: other,
                to_list_id: doing,
                position: None,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(BoardServiceError::TaskOutsideList { .. })
    ));

    let detail = stack.boards.board_detail(stack.user, board).await?;
    let todo_tasks: Vec<TaskId> = detail.lists[0].tasks.iter().map(|entry| entry.id()).collect();
    assert_eq!(todo_tasks, vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_move_by_a_non_owner_is_unauthorized(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let todo = seed_list(&stack, board, "Todo").await?.id();
    let doing = seed_list(&stack, board, "Doing").await?.id();
    let task = seed_task(&stack, board, todo, "Draft").await?.id();

    let result = stack
        .tasks
        .move_task(
            UserId::new(),
            board,
            task,
            MoveTaskRequest {
                from_list_id: todo,
                to_list_id: doing,
                position: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(BoardServiceError::UnauthorizedTask { .. })
    ));
    Ok(())
}
