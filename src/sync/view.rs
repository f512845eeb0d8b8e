//! Client-side view types mirroring one board.

use crate::board::domain::{BoardId, ListId, Position, TaskId};
use crate::board::services::BoardDetail;
use serde::{Deserialize, Serialize};

/// Client view of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Display title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Server-assigned sort key.
    pub position: Position,
}

/// Client view of one list with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    /// List identifier.
    pub id: ListId,
    /// Display title.
    pub title: String,
    /// Server-assigned sort key.
    pub position: Position,
    /// Tasks in display order.
    pub tasks: Vec<TaskView>,
}

/// Client view of one board: its visible lists in display order.
///
/// Archived lists are absent, matching board detail retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// Board identifier.
    pub board_id: BoardId,
    /// Visible lists in display order.
    pub lists: Vec<ListView>,
}

impl BoardView {
    /// Builds the view from a server board detail response.
    #[must_use]
    pub fn from_detail(detail: &BoardDetail) -> Self {
        let lists = detail
            .lists
            .iter()
            .map(|entry| ListView {
                id: entry.list.id(),
                title: entry.list.title().as_str().to_owned(),
                position: entry.list.position(),
                tasks: entry
                    .tasks
                    .iter()
                    .map(|task| TaskView {
                        id: task.id(),
                        title: task.title().as_str().to_owned(),
                        completed: task.is_completed(),
                        position: task.position(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            board_id: detail.board.id(),
            lists,
        }
    }

    /// Returns the display-order list identifiers.
    #[must_use]
    pub fn list_order(&self) -> Vec<ListId> {
        self.lists.iter().map(|list| list.id).collect()
    }

    /// Returns the display-order task identifiers of one list, or `None`
    /// when the list is not visible.
    #[must_use]
    pub fn task_order(&self, list: ListId) -> Option<Vec<TaskId>> {
        self.lists
            .iter()
            .find(|member| member.id == list)
            .map(|member| member.tasks.iter().map(|task| task.id).collect())
    }
}
