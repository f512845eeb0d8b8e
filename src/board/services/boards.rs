//! Service layer for board creation and retrieval.

use super::ServiceResult;
use super::access::owned_board;
use crate::board::{
    domain::{Board, BoardId, List, Task, Title, UserId},
    ports::{BoardRepository, ListRepository, TaskRepository},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    /// Display name for the new board.
    pub name: String,
}

/// One list of a board detail view, with its tasks sorted by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWithTasks {
    /// The list itself.
    pub list: List,
    /// The list's tasks in ascending position order.
    pub tasks: Vec<Task>,
}

/// Full board view: the board plus its active lists in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    /// The board.
    pub board: Board,
    /// Active lists sorted by position, each with sorted tasks. Archived
    /// lists are excluded.
    pub lists: Vec<ListWithTasks>,
}

/// Board retrieval and creation service.
#[derive(Clone)]
pub struct BoardService<B, L, T, C>
where
    B: BoardRepository,
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    boards: Arc<B>,
    lists: Arc<L>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<B, L, T, C> BoardService<B, L, T, C>
where
    B: BoardRepository,
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(boards: Arc<B>, lists: Arc<L>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            boards,
            lists,
            tasks,
            clock,
        }
    }

    /// Creates a new empty board owned by the requesting user.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`](super::BoardServiceError) when the name
    /// fails validation or the repository rejects persistence.
    pub async fn create_board(
        &self,
        user: UserId,
        request: CreateBoardRequest,
    ) -> ServiceResult<Board> {
        let name = Title::new(request.name)?;
        let board = Board::new(user, name, &*self.clock);
        self.boards.store(&board).await?;
        Ok(board)
    }

    /// Returns all boards owned by the requesting user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`BoardServiceError::Repository`](super::BoardServiceError::Repository)
    /// when the lookup fails.
    pub async fn boards_for_user(&self, user: UserId) -> ServiceResult<Vec<Board>> {
        Ok(self.boards.boards_for_owner(user).await?)
    }

    /// Returns one board with its active lists and their tasks, both sorted
    /// ascending by position.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`BoardServiceError::BoardNotFound`](super::BoardServiceError::BoardNotFound)
    /// when the board does not resolve or
    /// [`BoardServiceError::UnauthorizedBoard`](super::BoardServiceError::UnauthorizedBoard)
    /// when the caller does not own it.
    pub async fn board_detail(&self, user: UserId, board: BoardId) -> ServiceResult<BoardDetail> {
        let owned = owned_board(&*self.boards, user, board).await?;
        let active = self.lists.active_for_board(board).await?;
        let mut detail = Vec::with_capacity(active.len());
        for list in active {
            let members = self.tasks.tasks_for_list(list.id()).await?;
            detail.push(ListWithTasks {
                list,
                tasks: members,
            });
        }
        Ok(BoardDetail {
            board: owned,
            lists: detail,
        })
    }
}
