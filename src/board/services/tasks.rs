//! Service layer for task creation, updates, reordering, and cross-list
//! movement.

use super::access::{list_in_board, owned_board};
use super::{BoardServiceError, ServiceResult};
use crate::board::{
    domain::{BoardId, ListId, Position, PositionScheme, Task, TaskId, Title, UserId},
    ports::{BoardRepository, ListRepository, TaskRepository},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Display title for the new task.
    pub title: String,
}

/// Request payload for partially updating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Replacement title, when present.
    pub title: Option<String>,
    /// Replacement completion flag, when present.
    pub is_completed: Option<bool>,
}

/// One entry of a task reorder request.
///
/// The client echoes its locally computed position, but the server ignores
/// it and renumbers by request index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPositionEntry {
    /// Task being placed.
    pub task_id: TaskId,
    /// Client-computed position; ignored.
    pub position: Position,
}

/// Request payload for reordering a list's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTasksRequest {
    /// Target ordering; entry index determines the new position.
    pub positions: Vec<TaskPositionEntry>,
}

/// Request payload for moving a task between lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    /// List the task currently belongs to.
    pub from_list_id: ListId,
    /// List the task is dropped into.
    pub to_list_id: ListId,
    /// Position within the target list; defaults to 0 when unspecified.
    pub position: Option<Position>,
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<B, L, T, C>
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

impl<B, L, T, C> TaskService<B, L, T, C>
where
    B: BoardRepository,
    L: ListRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(boards: Arc<B>, lists: Arc<L>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            boards,
            lists,
            tasks,
            clock,
        }
    }

    /// Creates a task appended to the end of the list.
    ///
    /// The position is `max(sibling position) + 1000`, or 0 for the first
    /// task; the gap leaves room for future in-between insertion without
    /// immediate renumbering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the title fails validation, the
    /// board or list does not resolve, the list belongs to a different
    /// board, or the caller does not own the board.
    pub async fn create_task(
        &self,
        user: UserId,
        board: BoardId,
        list: ListId,
        request: CreateTaskRequest,
    ) -> ServiceResult<Task> {
        let title = Title::new(request.title)?;
        owned_board(&*self.boards, user, board).await?;
        list_in_board(&*self.lists, list, board).await?;
        let last = self.tasks.last_position(list).await?;
        let position = PositionScheme::TASKS.append_position(last);
        let task = Task::new(list, board, user, title, position, &*self.clock);
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Applies a partial update to a task's title and completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when the task does not
    /// resolve, [`BoardServiceError::UnauthorizedTask`] when the caller does
    /// not own it, or a validation error for a bad replacement title.
    pub async fn update_task(
        &self,
        user: UserId,
        task: TaskId,
        request: UpdateTaskRequest,
    ) -> ServiceResult<Task> {
        let mut member = self
            .tasks
            .find_by_id(task)
            .await?
            .ok_or(BoardServiceError::TaskNotFound(task))?;
        if member.owner() != user {
            return Err(BoardServiceError::UnauthorizedTask { user, task });
        }
        if let Some(raw_title) = request.title {
            member.rename(Title::new(raw_title)?, &*self.clock);
        }
        if let Some(completed) = request.is_completed {
            member.set_completed(completed, &*self.clock);
        }
        self.tasks.update(&member).await?;
        Ok(member)
    }

    /// Reorders the list's tasks to match the requested ordering.
    ///
    /// Positions are renumbered with step-1000 slots (`1000, 2000, …`);
    /// siblings omitted from the request are appended after the requested
    /// prefix in their prior relative order. The canonical sorted sibling
    /// set is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ReorderForeignMember`] or
    /// [`BoardServiceError::ReorderDuplicateMember`] when the request is not
    /// a subset-permutation of the list's tasks, plus the usual resolution
    /// and authorization errors.
    pub async fn reorder_tasks(
        &self,
        user: UserId,
        board: BoardId,
        list: ListId,
        request: ReorderTasksRequest,
    ) -> ServiceResult<Vec<Task>> {
        owned_board(&*self.boards, user, board).await?;
        list_in_board(&*self.lists, list, board).await?;
        let current = self.tasks.tasks_for_list(list).await?;
        let current_ids: Vec<TaskId> = current.iter().map(Task::id).collect();
        let requested: Vec<TaskId> = request
            .positions
            .iter()
            .map(|entry| entry.task_id)
            .collect();
        let plan = PositionScheme::TASKS
            .renumber(&current_ids, &requested)
            .map_err(BoardServiceError::from_reorder)?;
        Ok(self.tasks.reorder(list, plan.assignments()).await?)
    }

    /// Moves a task from one list to another on the same board.
    ///
    /// The detach, attach, and reparent writes are applied as one atomic
    /// step; the post-move task read back from storage is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::SameListMove`] when source and target
    /// are identical, membership errors when the task or lists do not belong
    /// to the stated parents, [`BoardServiceError::UnauthorizedTask`] when
    /// the caller does not own the task, and the usual resolution errors.
    pub async fn move_task(
        &self,
        user: UserId,
        board: BoardId,
        task: TaskId,
        request: MoveTaskRequest,
    ) -> ServiceResult<Task> {
        let MoveTaskRequest {
            from_list_id,
            to_list_id,
            position,
        } = request;
        if from_list_id == to_list_id {
            return Err(BoardServiceError::SameListMove(from_list_id));
        }

        let member = self
            .tasks
            .find_by_id(task)
            .await?
            .ok_or(BoardServiceError::TaskNotFound(task))?;
        if member.board_id() != board {
            return Err(BoardServiceError::TaskOutsideBoard { task, board });
        }
        if member.list_id() != from_list_id {
            return Err(BoardServiceError::TaskOutsideList {
                task,
                list: from_list_id,
            });
        }
        if member.owner() != user {
            return Err(BoardServiceError::UnauthorizedTask { user, task });
        }
        list_in_board(&*self.lists, from_list_id, board).await?;
        list_in_board(&*self.lists, to_list_id, board).await?;

        let target = position.unwrap_or(Position::ZERO);
        Ok(self
            .tasks
            .move_task(task, from_list_id, to_list_id, target)
            .await?)
    }
}
