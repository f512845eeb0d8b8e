//! Board creation and detail retrieval flows.

use crate::in_memory::helpers::{Stack, seed_board, seed_list, seed_task, stack};
use pegboard::board::domain::{Board, BoardId, ListId, Position, TaskId, UserId};
use pegboard::board::services::BoardServiceError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_boards_list_for_their_owner(stack: Stack) -> Result<(), eyre::Report> {
    let first = seed_board(&stack, "Launch").await?;
    let second = seed_board(&stack, "Marketing").await?;

    let owned = stack.boards.boards_for_user(stack.user).await?;
    let ids: Vec<BoardId> = owned.iter().map(Board::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);

    let stranger = stack.boards.boards_for_user(UserId::new()).await?;
    assert!(stranger.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_returns_lists_and_tasks_in_position_order(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let todo = seed_list(&stack, board, "Todo").await?;
    let doing = seed_list(&stack, board, "Doing").await?;
    let first = seed_task(&stack, board, todo.id(), "Draft").await?;
    let second = seed_task(&stack, board, todo.id(), "Review").await?;

    let detail = stack.boards.board_detail(stack.user, board).await?;

    let list_ids: Vec<ListId> = detail.lists.iter().map(|entry| entry.list.id()).collect();
    assert_eq!(list_ids, vec![todo.id(), doing.id()]);

    let todo_tasks: Vec<TaskId> = detail.lists[0].tasks.iter().map(|task| task.id()).collect();
    assert_eq!(todo_tasks, vec![first.id(), second.id()]);
    assert_eq!(detail.lists[0].tasks[1].position(), Position::new(1000));
    assert!(detail.lists[1].tasks.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_of_a_foreign_board_is_unauthorized(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();

    let result = stack.boards.board_detail(UserId::new(), board).await;

    assert!(matches!(
        result,
        Err(BoardServiceError::UnauthorizedBoard { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detail_of_an_unknown_board_is_not_found(stack: Stack) {
    let result = stack.boards.board_detail(stack.user, BoardId::new()).await;

    assert!(matches!(result, Err(BoardServiceError::BoardNotFound(_))));
}
