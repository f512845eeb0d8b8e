//! Service layer for list creation, reordering, and the archive lifecycle.

use super::access::{list_in_board, owned_board};
use super::{BoardServiceError, ServiceResult};
use crate::board::{
    domain::{BoardId, List, ListId, Position, PositionScheme, Title, UserId},
    ports::{BoardRepository, ListRepository},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request payload for creating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    /// Display title for the new list.
    pub title: String,
}

/// One entry of a list reorder request.
///
/// The client echoes its locally computed position, but the server ignores
/// it and renumbers by request index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPositionEntry {
    /// List being placed.
    pub list_id: ListId,
    /// Client-computed position; ignored.
    pub position: Position,
}

/// Request payload for reordering a board's lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderListsRequest {
    /// Target ordering; entry index determines the new position.
    pub positions: Vec<ListPositionEntry>,
}

/// List lifecycle orchestration service.
#[derive(Clone)]
pub struct ListService<B, L, C>
where
    B: BoardRepository,
    L: ListRepository,
    C: Clock + Send + Sync,
{
    boards: Arc<B>,
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<B, L, C> ListService<B, L, C>
where
    B: BoardRepository,
    L: ListRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(boards: Arc<B>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            boards,
            lists,
            clock,
        }
    }

    /// Creates a list appended to the end of the board.
    ///
    /// The position is `max(sibling position) + 1` over all of the board's
    /// lists, archived included, or 0 for the first list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the title fails validation, the
    /// board does not resolve, or the caller does not own it.
    pub async fn create_list(
        &self,
        user: UserId,
        board: BoardId,
        request: CreateListRequest,
    ) -> ServiceResult<List> {
        let title = Title::new(request.title)?;
        owned_board(&*self.boards, user, board).await?;
        let last = self.lists.last_position(board).await?;
        let position = PositionScheme::LISTS.append_position(last);
        let list = List::new(board, title, position, &*self.clock);
        self.lists.store(&list).await?;
        Ok(list)
    }

    /// Reorders the board's active lists to match the requested ordering.
    ///
    /// Positions are renumbered by request index (`0, 1, 2, …`); siblings
    /// omitted from the request are appended after the requested prefix in
    /// their prior relative order. The canonical sorted sibling set is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ReorderForeignMember`] or
    /// [`BoardServiceError::ReorderDuplicateMember`] when the request is not
    /// a subset-permutation of the board's active lists, plus the usual
    /// resolution and authorization errors.
    pub async fn reorder_lists(
        &self,
        user: UserId,
        board: BoardId,
        request: ReorderListsRequest,
    ) -> ServiceResult<Vec<List>> {
        owned_board(&*self.boards, user, board).await?;
        let current = self.lists.active_for_board(board).await?;
        let current_ids: Vec<ListId> = current.iter().map(List::id).collect();
        let requested: Vec<ListId> = request
            .positions
            .iter()
            .map(|entry| entry.list_id)
            .collect();
        let plan = PositionScheme::LISTS
            .renumber(&current_ids, &requested)
            .map_err(BoardServiceError::from_reorder)?;
        Ok(self.lists.reorder(board, plan.assignments()).await?)
    }

    /// Archives a list, excluding it from board detail retrieval.
    ///
    /// Archiving an archived list is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the list or board does not
    /// resolve, the list belongs to a different board, or the caller does
    /// not own the board.
    pub async fn archive_list(
        &self,
        user: UserId,
        board: BoardId,
        list: ListId,
    ) -> ServiceResult<List> {
        let mut member = list_in_board(&*self.lists, list, board).await?;
        owned_board(&*self.boards, user, board).await?;
        member.archive(&*self.clock);
        self.lists.update(&member).await?;
        Ok(member)
    }

    /// Restores an archived list to the active set.
    ///
    /// The list keeps the position it had when archived; the server does not
    /// reassign one.
    ///
    /// # Errors
    ///
    /// Returns the same resolution and authorization errors as
    /// [`Self::archive_list`].
    pub async fn unarchive_list(
        &self,
        user: UserId,
        board: BoardId,
        list: ListId,
    ) -> ServiceResult<List> {
        let mut member = list_in_board(&*self.lists, list, board).await?;
        owned_board(&*self.boards, user, board).await?;
        member.unarchive(&*self.clock);
        self.lists.update(&member).await?;
        Ok(member)
    }

    /// Returns the board's archived lists, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the board does not resolve or the
    /// caller does not own it.
    pub async fn archived_lists(&self, user: UserId, board: BoardId) -> ServiceResult<Vec<List>> {
        owned_board(&*self.boards, user, board).await?;
        Ok(self.lists.archived_for_board(board).await?)
    }

    /// Permanently deletes an archived list, cascading to its tasks and its
    /// board membership entry in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] when the list is still
    /// active, plus the usual resolution and authorization errors.
    pub async fn delete_list(
        &self,
        user: UserId,
        board: BoardId,
        list: ListId,
    ) -> ServiceResult<()> {
        let member = list_in_board(&*self.lists, list, board).await?;
        owned_board(&*self.boards, user, board).await?;
        member.ensure_deletable()?;
        self.lists.delete(board, list).await?;
        Ok(())
    }

    /// Permanently deletes every archived list of the board and returns how
    /// many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the board does not resolve or the
    /// caller does not own it.
    pub async fn delete_archived_lists(&self, user: UserId, board: BoardId) -> ServiceResult<u64> {
        owned_board(&*self.boards, user, board).await?;
        Ok(self.lists.delete_archived(board).await?)
    }
}
