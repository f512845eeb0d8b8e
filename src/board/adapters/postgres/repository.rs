//! `PostgreSQL` store implementing the board, list, and task repositories.
//!
//! Multi-entity write-sets run inside a single transaction that takes a
//! `FOR UPDATE` lock on the container row, so competing reorders and moves
//! against the same container serialize and a mid-operation failure rolls
//! the whole write-set back.

use super::{
    models::{BoardRow, ListRow, NewBoardRow, NewListRow, NewTaskRow, TaskRow},
    schema::{boards, lists, tasks},
};
use crate::board::{
    domain::{
        Board, BoardId, List, ListId, ListState, PersistedBoardData, PersistedListData,
        PersistedTaskData, Position, Task, TaskId, Title, UserId,
    },
    ports::{
        BoardRepository, ListRepository, RepositoryError, RepositoryResult, TaskRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed store for all three board-context repositories.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn decode_list_members(value: Value) -> RepositoryResult<Vec<ListId>> {
    serde_json::from_value(value).map_err(RepositoryError::persistence)
}

fn decode_task_members(value: Value) -> RepositoryResult<Vec<TaskId>> {
    serde_json::from_value(value).map_err(RepositoryError::persistence)
}

fn encode_members<I: serde::Serialize>(members: &[I]) -> RepositoryResult<Value> {
    serde_json::to_value(members).map_err(RepositoryError::persistence)
}

fn board_to_new_row(board: &Board) -> RepositoryResult<NewBoardRow> {
    Ok(NewBoardRow {
        id: board.id().into_inner(),
        owner_id: board.owner().into_inner(),
        name: board.name().as_str().to_owned(),
        list_order: encode_members(board.lists())?,
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    })
}

fn list_to_new_row(list: &List) -> RepositoryResult<NewListRow> {
    Ok(NewListRow {
        id: list.id().into_inner(),
        board_id: list.board_id().into_inner(),
        title: list.title().as_str().to_owned(),
        position: list.position().value(),
        task_order: encode_members(list.tasks())?,
        archived: list.is_archived(),
        created_at: list.created_at(),
        updated_at: list.updated_at(),
    })
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        board_id: task.board_id().into_inner(),
        owner_id: task.owner().into_inner(),
        title: task.title().as_str().to_owned(),
        position: task.position().value(),
        completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_board(row: BoardRow) -> RepositoryResult<Board> {
    let data = PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        owner: UserId::from_uuid(row.owner_id),
        name: Title::new(row.name).map_err(RepositoryError::persistence)?,
        lists: decode_list_members(row.list_order)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Board::from_persisted(data))
}

fn row_to_list(row: ListRow) -> RepositoryResult<List> {
    let data = PersistedListData {
        id: ListId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        title: Title::new(row.title).map_err(RepositoryError::persistence)?,
        position: Position::new(row.position),
        tasks: decode_task_members(row.task_order)?,
        state: ListState::from_archived_flag(row.archived),
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(List::from_persisted(data))
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        list_id: ListId::from_uuid(row.list_id),
        board_id: BoardId::from_uuid(row.board_id),
        owner: UserId::from_uuid(row.owner_id),
        title: Title::new(row.title).map_err(RepositoryError::persistence)?,
        position: Position::new(row.position),
        completed: row.completed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// Locks the board row for the duration of the transaction and returns its
/// membership payload, or `None` when the board does not exist.
fn lock_board_row(txn: &mut PgConnection, board: BoardId) -> RepositoryResult<Option<Value>> {
    boards::table
        .find(board.into_inner())
        .select(boards::list_order)
        .for_update()
        .first::<Value>(txn)
        .optional()
        .map_err(RepositoryError::persistence)
}

/// Locks the list row for the duration of the transaction and returns its
/// parent board and membership payload, or `None` when the list does not
/// exist.
fn lock_list_row(
    txn: &mut PgConnection,
    list: ListId,
) -> RepositoryResult<Option<(Uuid, Value)>> {
    lists::table
        .find(list.into_inner())
        .select((lists::board_id, lists::task_order))
        .for_update()
        .first::<(Uuid, Value)>(txn)
        .optional()
        .map_err(RepositoryError::persistence)
}

fn write_board_membership(
    txn: &mut PgConnection,
    board: BoardId,
    members: &[ListId],
) -> RepositoryResult<()> {
    diesel::update(boards::table.find(board.into_inner()))
        .set(boards::list_order.eq(encode_members(members)?))
        .execute(txn)?;
    Ok(())
}

fn write_list_membership(
    txn: &mut PgConnection,
    list: ListId,
    members: &[TaskId],
) -> RepositoryResult<()> {
    diesel::update(lists::table.find(list.into_inner()))
        .set(lists::task_order.eq(encode_members(members)?))
        .execute(txn)?;
    Ok(())
}

fn load_active_lists(txn: &mut PgConnection, board: BoardId) -> RepositoryResult<Vec<List>> {
    let rows = lists::table
        .filter(lists::board_id.eq(board.into_inner()).and(lists::archived.eq(false)))
        .order((lists::position.asc(), lists::created_at.asc()))
        .select(ListRow::as_select())
        .load::<ListRow>(txn)?;
    rows.into_iter().map(row_to_list).collect()
}

fn load_list_tasks(txn: &mut PgConnection, list: ListId) -> RepositoryResult<Vec<Task>> {
    let rows = tasks::table
        .filter(tasks::list_id.eq(list.into_inner()))
        .order((tasks::position.asc(), tasks::created_at.asc()))
        .select(TaskRow::as_select())
        .load::<TaskRow>(txn)?;
    rows.into_iter().map(row_to_task).collect()
}

#[async_trait]
impl BoardRepository for PostgresBoardStore {
    async fn store(&self, board: &Board) -> RepositoryResult<()> {
        let board_id = board.id();
        let new_row = board_to_new_row(board)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateBoard(board_id)
                    }
                    other => RepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> RepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .find(id.into_inner())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn boards_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .filter(boards::owner_id.eq(owner.into_inner()))
                .order(boards::created_at.asc())
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)?;
            rows.into_iter().map(row_to_board).collect()
        })
        .await
    }
}

#[async_trait]
impl ListRepository for PostgresBoardStore {
    async fn store(&self, list: &List) -> RepositoryResult<()> {
        let list_id = list.id();
        let board_id = list.board_id();
        let new_row = list_to_new_row(list)?;
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                let membership = lock_board_row(txn, board_id)?
                    .ok_or(RepositoryError::BoardNotFound(board_id))?;
                diesel::insert_into(lists::table)
                    .values(&new_row)
                    .execute(txn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            RepositoryError::DuplicateList(list_id)
                        }
                        other => RepositoryError::persistence(other),
                    })?;
                let mut members = decode_list_members(membership)?;
                if !members.contains(&list_id) {
                    members.push(list_id);
                }
                write_board_membership(txn, board_id, &members)
            })
        })
        .await
    }

    async fn update(&self, list: &List) -> RepositoryResult<()> {
        let list_id = list.id();
        let title = list.title().as_str().to_owned();
        let position = list.position().value();
        let archived = list.is_archived();
        let task_order = encode_members(list.tasks())?;
        let updated_at = list.updated_at();
        self.run_blocking(move |connection| {
            let affected = diesel::update(lists::table.find(list_id.into_inner()))
                .set((
                    lists::title.eq(title),
                    lists::position.eq(position),
                    lists::task_order.eq(task_order),
                    lists::archived.eq(archived),
                    lists::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::ListNotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ListId) -> RepositoryResult<Option<List>> {
        self.run_blocking(move |connection| {
            let row = lists::table
                .find(id.into_inner())
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn active_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>> {
        self.run_blocking(move |connection| load_active_lists(connection, board))
            .await
    }

    async fn archived_for_board(&self, board: BoardId) -> RepositoryResult<Vec<List>> {
        self.run_blocking(move |connection| {
            let rows = lists::table
                .filter(lists::board_id.eq(board.into_inner()).and(lists::archived.eq(true)))
                .order(lists::updated_at.desc())
                .select(ListRow::as_select())
                .load::<ListRow>(connection)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn last_position(&self, board: BoardId) -> RepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| {
            let last = lists::table
                .filter(lists::board_id.eq(board.into_inner()))
                .select(diesel::dsl::max(lists::position))
                .first::<Option<i64>>(connection)?;
            Ok(last.map(Position::new))
        })
        .await
    }

    async fn reorder(
        &self,
        board: BoardId,
        assignments: &[(ListId, Position)],
    ) -> RepositoryResult<Vec<List>> {
        let writes = assignments.to_vec();
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                lock_board_row(txn, board)?.ok_or(RepositoryError::BoardNotFound(board))?;
                for (id, position) in &writes {
                    let affected = diesel::update(
                        lists::table.filter(
                            lists::id
                                .eq(id.into_inner())
                                .and(lists::board_id.eq(board.into_inner())),
                        ),
                    )
                    .set(lists::position.eq(position.value()))
                    .execute(txn)?;
                    if affected == 0 {
                        return Err(RepositoryError::ListMembership { list: *id, board });
                    }
                }
                load_active_lists(txn, board)
            })
        })
        .await
    }

    async fn delete(&self, board: BoardId, list: ListId) -> RepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                let membership =
                    lock_board_row(txn, board)?.ok_or(RepositoryError::BoardNotFound(board))?;
                let parent = lists::table
                    .find(list.into_inner())
                    .select(lists::board_id)
                    .first::<Uuid>(txn)
                    .optional()?
                    .ok_or(RepositoryError::ListNotFound(list))?;
                if parent != board.into_inner() {
                    return Err(RepositoryError::ListMembership { list, board });
                }
                let mut members = decode_list_members(membership)?;
                members.retain(|member| *member != list);
                write_board_membership(txn, board, &members)?;
                diesel::delete(tasks::table.filter(tasks::list_id.eq(list.into_inner())))
                    .execute(txn)?;
                diesel::delete(lists::table.find(list.into_inner())).execute(txn)?;
                Ok(())
            })
        })
        .await
    }

    async fn delete_archived(&self, board: BoardId) -> RepositoryResult<u64> {
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                let membership =
                    lock_board_row(txn, board)?.ok_or(RepositoryError::BoardNotFound(board))?;
                let archived_ids = lists::table
                    .filter(lists::board_id.eq(board.into_inner()).and(lists::archived.eq(true)))
                    .select(lists::id)
                    .load::<Uuid>(txn)?;
                diesel::delete(tasks::table.filter(tasks::list_id.eq_any(&archived_ids)))
                    .execute(txn)?;
                diesel::delete(lists::table.filter(lists::id.eq_any(&archived_ids)))
                    .execute(txn)?;
                let mut members = decode_list_members(membership)?;
                members.retain(|member| !archived_ids.contains(&member.into_inner()));
                write_board_membership(txn, board, &members)?;
                Ok(archived_ids.len() as u64)
            })
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresBoardStore {
    async fn store(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let list_id = task.list_id();
        let board_id = task.board_id();
        let new_row = task_to_new_row(task);
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                let (parent_board, membership) =
                    lock_list_row(txn, list_id)?.ok_or(RepositoryError::ListNotFound(list_id))?;
                if parent_board != board_id.into_inner() {
                    return Err(RepositoryError::ListMembership {
                        list: list_id,
                        board: board_id,
                    });
                }
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(txn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            RepositoryError::DuplicateTask(task_id)
                        }
                        other => RepositoryError::persistence(other),
                    })?;
                let mut members = decode_task_members(membership)?;
                if !members.contains(&task_id) {
                    members.push(task_id);
                }
                write_list_membership(txn, list_id, &members)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let task_id = task.id();
        let title = task.title().as_str().to_owned();
        let position = task.position().value();
        let completed = task.is_completed();
        let updated_at = task.updated_at();
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set((
                    tasks::title.eq(title),
                    tasks::position.eq(position),
                    tasks::completed.eq(completed),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)?;
            if affected == 0 {
                return Err(RepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn tasks_for_list(&self, list: ListId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| load_list_tasks(connection, list))
            .await
    }

    async fn last_position(&self, list: ListId) -> RepositoryResult<Option<Position>> {
        self.run_blocking(move |connection| {
            let last = tasks::table
                .filter(tasks::list_id.eq(list.into_inner()))
                .select(diesel::dsl::max(tasks::position))
                .first::<Option<i64>>(connection)?;
            Ok(last.map(Position::new))
        })
        .await
    }

    async fn reorder(
        &self,
        list: ListId,
        assignments: &[(TaskId, Position)],
    ) -> RepositoryResult<Vec<Task>> {
        let writes = assignments.to_vec();
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                lock_list_row(txn, list)?.ok_or(RepositoryError::ListNotFound(list))?;
                for (id, position) in &writes {
                    let affected = diesel::update(
                        tasks::table.filter(
                            tasks::id
                                .eq(id.into_inner())
                                .and(tasks::list_id.eq(list.into_inner())),
                        ),
                    )
                    .set(tasks::position.eq(position.value()))
                    .execute(txn)?;
                    if affected == 0 {
                        return Err(RepositoryError::TaskMembership { task: *id, list });
                    }
                }
                load_list_tasks(txn, list)
            })
        })
        .await
    }

    async fn move_task(
        &self,
        task: TaskId,
        from: ListId,
        to: ListId,
        position: Position,
    ) -> RepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction(|txn| {
                // Lock both container rows in identifier order so two
                // crossing moves cannot deadlock.
                let mut containers = vec![from, to];
                containers.sort();
                containers.dedup();
                let mut locked = std::collections::HashMap::new();
                for container in containers {
                    let row = lock_list_row(txn, container)?
                        .ok_or(RepositoryError::ListNotFound(container))?;
                    locked.insert(container, row.1);
                }

                let current_list = tasks::table
                    .find(task.into_inner())
                    .select(tasks::list_id)
                    .first::<Uuid>(txn)
                    .optional()?
                    .ok_or(RepositoryError::TaskNotFound(task))?;
                if current_list != from.into_inner() {
                    return Err(RepositoryError::TaskMembership { task, list: from });
                }

                let source_value = locked
                    .get(&from)
                    .cloned()
                    .ok_or(RepositoryError::ListNotFound(from))?;
                let mut source_members = decode_task_members(source_value)?;
                source_members.retain(|member| *member != task);
                write_list_membership(txn, from, &source_members)?;

                let target_value = locked
                    .get(&to)
                    .cloned()
                    .ok_or(RepositoryError::ListNotFound(to))?;
                let mut target_members = decode_task_members(target_value)?;
                if !target_members.contains(&task) {
                    target_members.push(task);
                }
                write_list_membership(txn, to, &target_members)?;

                diesel::update(tasks::table.find(task.into_inner()))
                    .set((
                        tasks::list_id.eq(to.into_inner()),
                        tasks::position.eq(position.value()),
                    ))
                    .execute(txn)?;

                let row = tasks::table
                    .find(task.into_inner())
                    .select(TaskRow::as_select())
                    .first::<TaskRow>(txn)?;
                row_to_task(row)
            })
        })
        .await
    }
}
