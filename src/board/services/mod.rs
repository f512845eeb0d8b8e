//! Application services orchestrating board, list, and task operations.

mod access;
mod boards;
mod error;
mod lists;
mod tasks;

pub use boards::{BoardDetail, BoardService, CreateBoardRequest, ListWithTasks};
pub use error::{BoardServiceError, ErrorKind, ServiceResult};
pub use lists::{CreateListRequest, ListPositionEntry, ListService, ReorderListsRequest};
pub use tasks::{
    CreateTaskRequest, MoveTaskRequest, ReorderTasksRequest, TaskPositionEntry, TaskService,
    UpdateTaskRequest,
};
