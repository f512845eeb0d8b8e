//! Shared world state for drag-and-drop BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use pegboard::board::adapters::memory::InMemoryBoardStore;
use pegboard::board::domain::{BoardId, List, ListId, Task, TaskId, UserId};
use pegboard::board::services::{BoardService, BoardServiceError, ListService, TaskService};
use rstest::fixture;

/// Store type backing every repository port in the scenario stack.
pub type Store = InMemoryBoardStore;

/// Board service used by scenarios.
pub type TestBoards = BoardService<Store, Store, Store, DefaultClock>;

/// List service used by scenarios.
pub type TestLists = ListService<Store, Store, DefaultClock>;

/// Task service used by scenarios.
pub type TestTasks = TaskService<Store, Store, Store, DefaultClock>;

/// Scenario world for drag-and-drop behaviour tests.
pub struct DragWorld {
    pub user: UserId,
    pub boards: TestBoards,
    pub lists: TestLists,
    pub tasks: TestTasks,
    pub board: Option<BoardId>,
    pub list_names: HashMap<String, ListId>,
    pub task_names: HashMap<String, TaskId>,
    pub last_list_reorder: Option<Result<Vec<List>, BoardServiceError>>,
    pub last_task_reorder: Option<Result<Vec<Task>, BoardServiceError>>,
    pub last_move: Option<Result<Task, BoardServiceError>>,
}

impl DragWorld {
    /// Creates a world with a fresh in-memory stack and no scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
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
            board: None,
            list_names: HashMap::new(),
            task_names: HashMap::new(),
            last_list_reorder: None,
            last_task_reorder: None,
            last_move: None,
        }
    }

    /// Returns the scenario board identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when no board was seeded yet.
    pub fn board_id(&self) -> Result<BoardId, eyre::Report> {
        self.board
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Resolves a list seeded earlier by display title.
    ///
    /// # Errors
    ///
    /// Returns an error when the title was never seeded.
    pub fn list_named(&self, title: &str) -> Result<ListId, eyre::Report> {
        self.list_names
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown list {title:?} in scenario world"))
    }

    /// Resolves a task seeded earlier by display title.
    ///
    /// # Errors
    ///
    /// Returns an error when the title was never seeded.
    pub fn task_named(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_names
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task {title:?} in scenario world"))
    }
}

impl Default for DragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragWorld {
    DragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
