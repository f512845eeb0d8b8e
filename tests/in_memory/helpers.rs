//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use pegboard::board::adapters::memory::InMemoryBoardStore;
use pegboard::board::domain::{Board, BoardId, List, ListId, Task, UserId};
use pegboard::board::services::{
    BoardService, CreateBoardRequest, CreateListRequest, CreateTaskRequest, ListService,
    TaskService,
};
use rstest::fixture;
use std::sync::Arc;

/// Store type shared by every repository port in the stack.
pub type Store = InMemoryBoardStore;

/// Board service over the shared store.
pub type Boards = BoardService<Store, Store, Store, DefaultClock>;

/// List service over the shared store.
pub type Lists = ListService<Store, Store, DefaultClock>;

/// Task service over the shared store.
pub type Tasks = TaskService<Store, Store, Store, DefaultClock>;

/// One user's full service stack over a shared in-memory store.
pub struct Stack {
    /// Requesting user owning the seeded boards.
    pub user: UserId,
    /// Board service.
    pub boards: Boards,
    /// List service.
    pub lists: Lists,
    /// Task service.
    pub tasks: Tasks,
    /// Direct handle on the backing store for read-back assertions.
    pub store: Arc<Store>,
}

/// Provides a fresh service stack for each test.
#[fixture]
pub fn stack() -> Stack {
    let store = Arc::new(InMemoryBoardStore::new());
    let clock = Arc::new(DefaultClock);
    Stack {
        user: UserId::new(),
        boards: BoardService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&clock),
        ),
        lists: ListService::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&clock)),
        tasks: TaskService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            clock,
        ),
        store,
    }
}

/// Creates a board owned by the stack's user.
///
/// # Errors
///
/// Returns an error when board creation fails.
pub async fn seed_board(stack: &Stack, name: &str) -> Result<Board, eyre::Report> {
    Ok(stack
        .boards
        .create_board(
            stack.user,
            CreateBoardRequest {
                name: name.to_owned(),
            },
        )
        .await?)
}

/// Creates a list appended to the given board.
///
/// # Errors
///
/// Returns an error when list creation fails.
pub async fn seed_list(stack: &Stack, board: BoardId, title: &str) -> Result<List, eyre::Report> {
    Ok(stack
        .lists
        .create_list(
            stack.user,
            board,
            CreateListRequest {
                title: title.to_owned(),
            },
        )
        .await?)
}

/// Creates a task appended to the given list.
///
/// # Errors
///
/// Returns an error when task creation fails.
pub async fn seed_task(
    stack: &Stack,
    board: BoardId,
    list: ListId,
    title: &str,
) -> Result<Task, eyre::Report> {
    Ok(stack
        .tasks
        .create_task(
            stack.user,
            board,
            list,
            CreateTaskRequest {
                title: title.to_owned(),
            },
        )
        .await?)
}
