//! In-memory store for board, list, and task repositories.
//!
//! One store-wide lock backs all three ports, so the multi-entity
//! write-sets (create-and-attach, reorder, move, cascade delete) are atomic
//! and competing calls against the same container serialize.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Board, BoardId, List, ListId, Position, Task, TaskId, UserId},
    ports::{
        BoardRepository, ListRepository, RepositoryError, RepositoryResult, TaskRepository,
    },
};

/// Thread-safe in-memory board store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    boards: HashMap<BoardId, Board>,
    lists: HashMap<ListId, List>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> RepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Sorts lists the way board retrieval presents them: ascending position,
/// creation time as the tiebreak.
fn sort_by_position(lists: &mut [List]) {
    lists.sort_by_key(|list| (list.position(), list.created_at()));
}

/// Sorts tasks ascending by position, creation time as the tiebreak.
fn sort_tasks_by_position(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.position(), task.created_at()));
}

fn active_lists_sorted(state: &StoreState, board: BoardId) -> Vec<List> {
    let mut members: Vec<List> = state
        .lists
        .values()
        .filter(|list| list.board_id() == board && !list.is_archived())
        .cloned()
        .collect();
    sort_by_position(&mut members);
    members
}

fn tasks_sorted(state: &StoreState, list: ListId) -> Vec<Task> {
    let mut members: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| task.list_id() == list)
        .cloned()
        .collect();
    sort_tasks_by_position(&mut members);
    members
}

/// Removes a list together with its tasks and its board membership entry.
fn purge_list(state: &mut StoreState, board: BoardId, list: ListId) {
    if let Some(owner_board) = state.boards.get_mut(&board) {
        owner_board.detach_list(list);
    }
    state.tasks.retain(|_, task| task.list_id() != list);
    state.lists.remove(&list);
}

#[async_trait]
impl BoardRepository for InMemoryBoardStore {
    async fn store(&self, board: &Board) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.boards.contains_key(&board.id()) {
            return Err(RepositoryError::DuplicateBoard(board.id()));
        }
        state.boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> RepositoryResult<Option<Board>> {
        let state = self.read_state()?;
        Ok(state.boards.get(&id).cloned())
    }

    async fn boards_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Board>> {
        let state = self.read_state()?;
        let mut owned: Vec<Board> = state
            .boards
            .values()
            .filter(|board| board.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(Board::created_at);
        Ok(owned)
    }
}

#[async_trait]
impl ListRepository for InMemoryBoardStore {
    async fn store(&self, list: &List) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.lists.contains_key(&list.id()) {
            return Err(RepositoryError::DuplicateList(list.id()));
        }
        let parent = state
            .boards
            .get_mut(&list.board_id())
            .ok_or(RepositoryError::BoardNotFound(list.board_id()))?;
        parent.attach_list(list.id());
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn update(&self, list: &List) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.lists.contains_key(&list.id()) {
            return Err(RepositoryError::ListNotFound(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<List>> {
        let state = self.read_state()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn active_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>> {
        let state = self.read_state()?;
        Ok(active_lists_sorted(&state, board))
    }

    async fn archived_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>> {
        let state = self.read_state()?;
        let mut members: Vec<List> = state
            .lists
            .values()
            .filter(|list| list.board_id() == board && list.is_archived())
            .cloned()
            .collect();
        members.sort_by_key(|list| std::cmp::Reverse(list.updated_at()));
        Ok(members)
    }

    async fn last_position(&self, board: BoardId) -> RepositoryResult<Option<Position>> {
        let state = self.read_state()?;
        Ok(state
            .lists
            .values()
            .filter(|list| list.board_id() == board)
            .map(List::position)
            .max())
    }

    async fn reorder(
        &self,
        board: BoardId,
        assignments: &[(ListId, Position)],
    ) -> RepositoryResult<Vec<List>> {
        let mut state = self.write_state()?;
        if !state.boards.contains_key(&board) {
            return Err(RepositoryError::BoardNotFound(board));
        }
        // Validate the whole write-set before touching anything so a
        // membership violation leaves no partial renumbering.
        for (id, _) in assignments {
            let member = state
                .lists
                .get(id)
                .filter(|list| list.board_id() == board);
            if member.is_none() {
                return Err(RepositoryError::ListMembership { list: *id, board });
            }
        }
        for (id, position) in assignments {
            if let Some(list) = state.lists.get_mut(id) {
                list.set_position(*position);
            }
        }
        Ok(active_lists_sorted(&state, board))
    }

    async fn delete(&self, board: BoardId, list: ListId) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        let member = state
            .lists
            .get(&list)
            .ok_or(RepositoryError::ListNotFound(list))?;
        if member.board_id() != board {
            return Err(RepositoryError::ListMembership { list, board });
        }
        purge_list(&mut state, board, list);
        Ok(())
    }

    async fn delete_archived(&self, board: BoardId) -> RepositoryResult<u64> {
        let mut state = self.write_state()?;
        if !state.boards.contains_key(&board) {
            return Err(RepositoryError::BoardNotFound(board));
        }
        let archived: Vec<ListId> = state
            .lists
            .values()
            .filter(|list| list.board_id() == board && list.is_archived())
            .map(List::id)
            .collect();
        for id in &archived {
            purge_list(&mut state, board, *id);
        }
        Ok(archived.len() as u64)
    }
}

#[async_trait]
impl TaskRepository for InMemoryBoardStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::DuplicateTask(task.id()));
        }
        let parent = state
            .lists
            .get_mut(&task.list_id())
            .ok_or(RepositoryError::ListNotFound(task.list_id()))?;
        if parent.board_id() != task.board_id() {
            return Err(RepositoryError::ListMembership {
                list: task.list_id(),
                board: task.board_id(),
            });
        }
        parent.attach_task(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn tasks_for_list(&self, list: ListId) -> RepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(tasks_sorted(&state, list))
    }

    async fn last_position(&self, list: ListId) -> RepositoryResult<Option<Position>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.list_id() == list)
            .map(Task::position)
            .max())
    }

    async fn reorder(
        &self,
        list: ListId,
        assignments: &[(TaskId, Position)],
    ) -> RepositoryResult<Vec<Task>> {
        let mut state = self.write_state()?;
        if !state.lists.contains_key(&list) {
            return Err(RepositoryError::ListNotFound(list));
        }
        for (id, _) in assignments {
            let member = state.tasks.get(id).filter(|task| task.list_id() == list);
            if member.is_none() {
                return Err(RepositoryError::TaskMembership { task: *id, list });
            }
        }
        for (id, position) in assignments {
            if let Some(task) = state.tasks.get_mut(id) {
                task.set_position(*position);
            }
        }
        Ok(tasks_sorted(&state, list))
    }

    async fn move_task(
        &self,
        task: TaskId,
        from: ListId,
        to: ListId,
        position: Position,
    ) -> RepositoryResult<Task> {
        let mut state = self.write_state()?;
        let moved = state
            .tasks
            .get(&task)
            .ok_or(RepositoryError::TaskNotFound(task))?;
        if moved.list_id() != from {
            return Err(RepositoryError::TaskMembership { task, list: from });
        }
        if !state.lists.contains_key(&from) {
            return Err(RepositoryError::ListNotFound(from));
        }
        if !state.lists.contains_key(&to) {
            return Err(RepositoryError::ListNotFound(to));
        }

        if let Some(source) = state.lists.get_mut(&from) {
            source.detach_task(task);
        }
        if let Some(target) = state.lists.get_mut(&to) {
            target.attach_task(task);
        }
        let relocated = state
            .tasks
            .get_mut(&task)
            .ok_or(RepositoryError::TaskNotFound(task))?;
        relocated.relocate(to, position);
        Ok(relocated.clone())
    }
}
