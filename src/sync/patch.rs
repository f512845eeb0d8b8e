//! Optimistic patches a client applies ahead of server confirmation.

use super::view::{BoardView, ListView};
use crate::board::domain::{ListId, TaskId};
use serde::{Deserialize, Serialize};

/// One optimistic board mutation, mirroring a pending server request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardPatch {
    /// Drag-reorder of the board's visible lists.
    ReorderLists {
        /// Target list ordering; omitted lists keep their relative order
        /// after the requested prefix.
        order: Vec<ListId>,
    },
    /// Drag-reorder of one list's tasks.
    ReorderTasks {
        /// List whose tasks are reordered.
        list: ListId,
        /// Target task ordering.
        order: Vec<TaskId>,
    },
    /// Drag of a task into another list.
    MoveTask {
        /// Task being moved.
        task: TaskId,
        /// Source list.
        from: ListId,
        /// Target list.
        to: ListId,
        /// Drop index within the target list.
        index: usize,
    },
    /// Archiving removes the list from the visible board.
    ArchiveList {
        /// List being archived.
        list: ListId,
    },
    /// Restoring appends the list to the end of the visible board; the
    /// server does not reassign a position on restore.
    UnarchiveList {
        /// Restored list view.
        list: ListView,
    },
}

/// Applies a patch to the view in place.
///
/// Application is lenient: identifiers that no longer resolve are skipped.
/// The patch only anticipates the server response, and reconciliation with
/// the canonical state corrects any divergence.
pub(super) fn apply_patch(view: &mut BoardView, patch: &BoardPatch) {
    match patch {
        BoardPatch::ReorderLists { order } => {
            let mut placed = Vec::with_capacity(view.lists.len());
            for id in order {
                if let Some(found) = view.lists.iter().position(|member| member.id == *id) {
                    placed.push(view.lists.remove(found));
                }
            }
            placed.append(&mut view.lists);
            view.lists = placed;
        }
        BoardPatch::ReorderTasks { list, order } => {
            if let Some(member) = view.lists.iter_mut().find(|entry| entry.id == *list) {
                let mut placed = Vec::with_capacity(member.tasks.len());
                for id in order {
                    if let Some(found) = member.tasks.iter().position(|task| task.id == *id) {
                        placed.push(member.tasks.remove(found));
                    }
                }
                placed.append(&mut member.tasks);
                member.tasks = placed;
            }
        }
        BoardPatch::MoveTask {
            task,
            from,
            to,
            index,
        } => {
            if !view.lists.iter().any(|entry| entry.id == *to) {
                return;
            }
            let detached = view
                .lists
                .iter_mut()
                .find(|entry| entry.id == *from)
                .and_then(|source| {
                    source
                        .tasks
                        .iter()
                        .position(|member| member.id == *task)
                        .map(|found| source.tasks.remove(found))
                });
            if let Some(moved) = detached {
                if let Some(target) = view.lists.iter_mut().find(|entry| entry.id == *to) {
                    let slot = (*index).min(target.tasks.len());
                    target.tasks.insert(slot, moved);
                }
            }
        }
        BoardPatch::ArchiveList { list } => {
            view.lists.retain(|member| member.id != *list);
        }
        BoardPatch::UnarchiveList { list } => {
            if !view.lists.iter().any(|member| member.id == list.id) {
                view.lists.push(list.clone());
            }
        }
    }
}
