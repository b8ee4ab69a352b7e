//! Drag-and-Drop Status Transitions
//!
//! A drag gesture moves through `Idle → Dragging → HoveringZone → Dropped`
//! and always ends back in `Idle`. The machine only tracks the gesture; the
//! status decision is made by [`resolve_drop`] against the task cache, and
//! the server call by the controller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Column;
use crate::cache::TaskCache;
use crate::domain::{TaskId, TaskStatus};

/// Transfer channel carrying the serialized [`DragContext`]
pub const PAYLOAD_FORMAT_JSON: &str = "application/json";
/// Transfer channel carrying the bare task id
pub const PAYLOAD_FORMAT_TEXT: &str = "text/plain";

/// Typed drag payload, built at drag start and consumed at drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragContext {
    pub task_id: TaskId,
}

impl DragContext {
    pub fn new(task_id: TaskId) -> Self {
        Self { task_id }
    }

    /// Value for the [`PAYLOAD_FORMAT_JSON`] channel
    pub fn to_json(&self) -> String {
        serde_json::json!({ "taskId": self.task_id }).to_string()
    }

    /// Value for the [`PAYLOAD_FORMAT_TEXT`] channel
    pub fn to_plain(&self) -> String {
        self.task_id.to_string()
    }

    /// Recover the context from whichever transfer channels survived.
    ///
    /// The JSON channel is preferred; the plain id is the fallback.
    pub fn from_transfer(json: Option<&str>, plain: Option<&str>) -> Option<Self> {
        json.filter(|s| !s.trim().is_empty())
            .and_then(|s| serde_json::from_str::<DragContext>(s).ok())
            .or_else(|| plain.and_then(|s| s.trim().parse().ok()).map(DragContext::new))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskId),
    HoveringZone(TaskId, Column),
    Dropped(TaskId, Column),
}

/// Why a drop did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Drop without a drag started from a task card
    NotDragging,
    /// No task id could be recovered from the payload
    MissingTaskId,
    /// The drop zone does not map to a column
    UnknownColumn,
    /// The task is no longer in the cache
    TaskNotFound,
    /// The task already has the target status
    SameColumn,
}

/// A resolved gesture: this task was released over this column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropIntent {
    pub task_id: TaskId,
    pub column: Column,
}

/// What the engine should do with a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Commit {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
    NoOp(NoOpReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Task currently being dragged
    pub fn dragging_id(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging(id) | DragState::HoveringZone(id, _) => Some(id),
            DragState::Idle | DragState::Dropped(..) => None,
        }
    }

    /// Column currently marked as the drop target
    pub fn active_zone(&self) -> Option<Column> {
        match self.state {
            DragState::HoveringZone(_, column) => Some(column),
            _ => None,
        }
    }

    /// Drag start on a task card; returns the payload to publish
    pub fn begin(&mut self, task_id: TaskId) -> DragContext {
        debug!(task_id, "drag start");
        self.state = DragState::Dragging(task_id);
        DragContext::new(task_id)
    }

    /// Pointer entered a drop zone
    pub fn enter_zone(&mut self, column: Column) {
        if let Some(id) = self.dragging_id() {
            self.state = DragState::HoveringZone(id, column);
        }
    }

    /// Pointer left a drop zone.
    ///
    /// `into_descendant` is true when the pointer only moved onto a child
    /// element of the same zone; the mark stays in that case.
    pub fn leave_zone(&mut self, column: Column, into_descendant: bool) {
        if into_descendant {
            return;
        }
        if let DragState::HoveringZone(id, active) = self.state {
            if active == column {
                self.state = DragState::Dragging(id);
            }
        }
    }

    /// Release over a zone identified by its key.
    ///
    /// On success the machine sits in `Dropped` until [`DragMachine::end`];
    /// any failed resolution returns straight to `Idle`.
    pub fn release(&mut self, payload: Option<DragContext>, zone_key: Option<&str>) -> Result<DropIntent, NoOpReason> {
        let resolved = self.resolve(payload, zone_key);
        self.state = match resolved {
            Ok(intent) => DragState::Dropped(intent.task_id, intent.column),
            Err(reason) => {
                debug!(?reason, "drop ignored");
                DragState::Idle
            }
        };
        resolved
    }

    fn resolve(&self, payload: Option<DragContext>, zone_key: Option<&str>) -> Result<DropIntent, NoOpReason> {
        if self.dragging_id().is_none() {
            return Err(NoOpReason::NotDragging);
        }
        let task_id = payload.map(|p| p.task_id).ok_or(NoOpReason::MissingTaskId)?;
        let column = zone_key
            .and_then(Column::from_zone_key)
            .ok_or(NoOpReason::UnknownColumn)?;
        Ok(DropIntent { task_id, column })
    }

    /// Drag end; every gesture finishes here
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Decide whether a drop changes anything.
///
/// Dropping a task into the column of its current effective status is a
/// no-op and must not reach the network.
pub fn resolve_drop(intent: DropIntent, tasks: &TaskCache) -> DropOutcome {
    let Some(task) = tasks.get(intent.task_id) else {
        return DropOutcome::NoOp(NoOpReason::TaskNotFound);
    };
    let target = intent.column.status();
    if task.status == target {
        return DropOutcome::NoOp(NoOpReason::SameColumn);
    }
    DropOutcome::Commit {
        task_id: task.id,
        from: task.status,
        to: target,
    }
}
