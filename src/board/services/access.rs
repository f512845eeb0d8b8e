//! Shared ownership and membership checks for board services.

use super::{BoardServiceError, ServiceResult};
use crate::board::domain::{Board, BoardId, List, ListId, UserId};
use crate::board::ports::{BoardRepository, ListRepository};

/// Resolves a board and checks that the requesting user owns it.
pub(super) async fn owned_board<B: BoardRepository>(
    boards: &B,
    user: UserId,
    board: BoardId,
) -> ServiceResult<Board> {
    let found = boards
        .find_by_id(board)
        .await?
        .ok_or(BoardServiceError::BoardNotFound(board))?;
    if found.owner() != user {
        return Err(BoardServiceError::UnauthorizedBoard { user, board });
    }
    Ok(found)
}

/// Resolves a list and checks that it belongs to the stated board.
pub(super) async fn list_in_board<L: ListRepository>(
    lists: &L,
    list: ListId,
    board: BoardId,
) -> ServiceResult<List> {
    let found = lists
        .find_by_id(list)
        .await?
        .ok_or(BoardServiceError::ListNotFound(list))?;
    if found.board_id() != board {
        return Err(BoardServiceError::ListOutsideBoard { list, board });
    }
    Ok(found)
}
