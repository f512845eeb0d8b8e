//! Archive lifecycle and permanent deletion over the in-memory store.

use crate::in_memory::helpers::{Stack, seed_board, seed_list, seed_task, stack};
use pegboard::board::domain::{List, ListId};
use pegboard::board::ports::{ListRepository, TaskRepository};
use pegboard::board::services::BoardServiceError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archiving_hides_a_list_and_unarchiving_restores_it(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let todo = seed_list(&stack, board, "Todo").await?;
    let doing = seed_list(&stack, board, "Doing").await?;

    stack.lists.archive_list(stack.user, board, todo.id()).await?;

    let hidden = stack.boards.board_detail(stack.user, board).await?;
    let visible: Vec<ListId> = hidden.lists.iter().map(|entry| entry.list.id()).collect();
    assert_eq!(visible, vec![doing.id()]);

    let restored = stack
        .lists
        .unarchive_list(stack.user, board, todo.id())
        .await?;
    // The server keeps the archived position rather than reassigning one,
    // so the list returns to its old slot in position order.
    assert_eq!(restored.position(), todo.position());

    let detail = stack.boards.board_detail(stack.user, board).await?;
    let ids: Vec<ListId> = detail.lists.iter().map(|entry| entry.list.id()).collect();
    assert_eq!(ids, vec![todo.id(), doing.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_listing_is_most_recently_updated_first(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let first = seed_list(&stack, board, "Old").await?;
    let second = seed_list(&stack, board, "Older").await?;

    for doomed in [first.id(), second.id()] {
        stack.lists.archive_list(stack.user, board, doomed).await?;
    }

    let archived = stack.lists.archived_lists(stack.user, board).await?;
    let ids: Vec<ListId> = archived.iter().map(List::id).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_archived_list_cascades_to_its_tasks(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let list = seed_list(&stack, board, "Todo").await?.id();
    let task = seed_task(&stack, board, list, "Draft").await?.id();

    stack.lists.archive_list(stack.user, board, list).await?;
    stack.lists.delete_list(stack.user, board, list).await?;

    let gone_list = ListRepository::find_by_id(&*stack.store, list).await?;
    assert!(gone_list.is_none());
    let gone_task = TaskRepository::find_by_id(&*stack.store, task).await?;
    assert!(gone_task.is_none());

    let detail = stack.boards.board_detail(stack.user, board).await?;
    assert!(detail.lists.is_empty());
    assert!(!detail.board.contains_list(list));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_operations_on_a_list_outside_the_board_are_rejected(
    stack: Stack,
) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let other_board = seed_board(&stack, "Other").await?.id();
    let foreign = seed_list(&stack, other_board, "Elsewhere").await?.id();

    let result = stack.lists.archive_list(stack.user, board, foreign).await;

    assert!(matches!(
        result,
        Err(BoardServiceError::ListOutsideBoard { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_archive_deletion_clears_membership(stack: Stack) -> Result<(), eyre::Report> {
    let board = seed_board(&stack, "Launch").await?.id();
    let keep = seed_list(&stack, board, "Keep").await?.id();
    let drop_one = seed_list(&stack, board, "Drop one").await?.id();
    let drop_two = seed_list(&stack, board, "Drop two").await?.id();
    for doomed in [drop_one, drop_two] {
        stack.lists.archive_list(stack.user, board, doomed).await?;
    }

    let removed = stack.lists.delete_archived_lists(stack.user, board).await?;
    assert_eq!(removed, 2);

    let detail = stack.boards.board_detail(stack.user, board).await?;
    assert_eq!(detail.board.lists(), &[keep]);
    Ok(())
}
