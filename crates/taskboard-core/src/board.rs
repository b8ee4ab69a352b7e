//! Board Columns
//!
//! The board has one column per [`TaskStatus`]; the mapping is fixed.

use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskStatus};

/// Placeholder shown in To-Do when there are no tasks at all
pub const EMPTY_BOARD_PLACEHOLDER: &str = "Create your first task!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Todo,
    InProgress,
    Completed,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Completed];

    /// Status a task takes when dropped here
    pub fn status(&self) -> TaskStatus {
        match self {
            Column::Todo => TaskStatus::Todo,
            Column::InProgress => TaskStatus::InProgress,
            Column::Completed => TaskStatus::Completed,
        }
    }

    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => Column::Todo,
            TaskStatus::InProgress => Column::InProgress,
            TaskStatus::Completed => Column::Completed,
        }
    }

    /// Key carried by the drop zone element (`data-status`)
    pub fn zone_key(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::InProgress => "in-progress",
            Column::Completed => "completed",
        }
    }

    /// Resolve a drop zone key; unknown keys resolve to nothing
    pub fn from_zone_key(key: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|column| column.zone_key() == key)
    }

    pub fn title(&self) -> &'static str {
        self.status().label()
    }

    pub fn empty_placeholder(&self) -> &'static str {
        match self {
            Column::Todo => "No pending tasks",
            Column::InProgress => "No tasks in progress",
            Column::Completed => "No completed tasks",
        }
    }
}

/// The three disjoint column lists derived from the task cache
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub completed: Vec<Task>,
}

impl BoardColumns {
    /// Partition tasks by effective status, keeping their relative order
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut columns = BoardColumns::default();
        for task in tasks {
            columns.column_mut(Column::for_status(task.status)).push(task.clone());
        }
        columns
    }

    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Completed => &self.completed,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Completed => &mut self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.completed.len()
    }

    /// Placeholder text for an empty column, `None` when it has tasks
    pub fn placeholder(&self, column: Column) -> Option<&'static str> {
        if !self.column(column).is_empty() {
            return None;
        }
        if self.total() == 0 && column == Column::Todo {
            return Some(EMPTY_BOARD_PLACEHOLDER);
        }
        Some(column.empty_placeholder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_keys_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_zone_key(column.zone_key()), Some(column));
            assert_eq!(Column::for_status(column.status()), column);
        }
        assert_eq!(Column::from_zone_key("archived"), None);
        assert_eq!(Column::from_zone_key(""), None);
    }

    #[test]
    fn test_placeholders() {
        let empty = BoardColumns::default();
        assert_eq!(empty.placeholder(Column::Todo), Some(EMPTY_BOARD_PLACEHOLDER));
        assert_eq!(empty.placeholder(Column::InProgress), Some("No tasks in progress"));
        assert_eq!(empty.placeholder(Column::Completed), Some("No completed tasks"));

        let task: Task = serde_json::from_str(r#"{"id": 1, "title": "a", "status": "COMPLETED"}"#).unwrap();
        let columns = BoardColumns::from_tasks([&task]);
        assert_eq!(columns.placeholder(Column::Todo), Some("No pending tasks"));
        assert_eq!(columns.placeholder(Column::Completed), None);
    }
}
