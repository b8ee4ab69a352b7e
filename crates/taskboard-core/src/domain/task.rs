//! Task Entity
//!
//! Tasks arrive from the server in one of two shapes: with an explicit
//! `status`, or (older records) with only the `isCompleted` flag. Both are
//! folded into a single resolved [`TaskStatus`] at deserialization time, so
//! nothing downstream ever branches on the legacy flag.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::category::CategoryRef;
use super::entity::Entity;
use super::CategoryId;
use crate::error::BoardError;

pub type TaskId = u64;

/// Maximum title length accepted by the server
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum description length accepted by the server
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Workflow status; one per board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    /// Wire representation, as used in `?status=` query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(BoardError::Validation(format!("Unknown status: {other}"))),
        }
    }
}

/// Ordered priority scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    /// CSS class used by the task card badge
    pub fn css_class(&self) -> &'static str {
        match self {
            Priority::Low => "priority-low",
            Priority::Medium => "priority-medium",
            Priority::High => "priority-high",
            Priority::Urgent => "priority-urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "URGENT" => Ok(Priority::Urgent),
            other => Err(BoardError::Validation(format!("Unknown priority: {other}"))),
        }
    }
}

/// Resolve the effective status of a record.
///
/// An explicit status always wins. Records without one fall back to the
/// legacy completion flag: `true` means COMPLETED, anything else TODO.
pub fn resolve_status(explicit: Option<TaskStatus>, completed_flag: Option<bool>) -> TaskStatus {
    match (explicit, completed_flag) {
        (Some(status), _) => status,
        (None, Some(true)) => TaskStatus::Completed,
        (None, _) => TaskStatus::Todo,
    }
}

/// Task record exactly as the server sends it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_completed: Option<bool>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    due_date: Option<NaiveDateTime>,
    #[serde(default)]
    completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    created_at: Option<NaiveDateTime>,
    #[serde(default)]
    updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    category: Option<CategoryRef>,
}

/// A task, normalized at ingestion
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    /// Server-assigned identifier
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    /// Effective status (explicit status, or derived from the legacy flag)
    pub status: TaskStatus,
    /// Server completion flag, flipped by `/toggle` independently of
    /// `status`. Records without one take it from the effective status.
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub category: Option<CategoryRef>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let status = resolve_status(raw.status, raw.is_completed);
        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description.filter(|d| !d.is_empty()),
            status,
            completed: raw.is_completed.unwrap_or(status == TaskStatus::Completed),
            priority: raw.priority.unwrap_or_default(),
            due_date: raw.due_date,
            completed_at: raw.completed_at,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            category: raw.category,
        }
    }
}

impl Task {
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Full task payload for `POST /tasks` and `PUT /tasks/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub category_id: Option<CategoryId>,
    pub due_date: Option<NaiveDateTime>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            category_id: None,
            due_date: None,
        }
    }
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Prefill an edit form from a cached task
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            category_id: task.category_id(),
            due_date: task.due_date,
        }
    }

    /// Check the server's field constraints and return the payload to send
    pub fn validated(&self) -> Result<TaskDraft, BoardError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(BoardError::Validation("Task title is required".into()));
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(BoardError::Validation(format!(
                "Task title must be between 1 and {TITLE_MAX_CHARS} characters"
            )));
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
            return Err(BoardError::Validation(format!(
                "Description cannot exceed {DESCRIPTION_MAX_CHARS} characters"
            )));
        }

        Ok(TaskDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            ..self.clone()
        })
    }
}
