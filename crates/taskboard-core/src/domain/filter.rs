//! Task list filter
//!
//! Maps onto the optional `categoryId` / `isCompleted` query parameters of
//! `GET /tasks`.

use serde::{Deserialize, Serialize};

use super::CategoryId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub category_id: Option<CategoryId>,
    pub completed: Option<bool>,
}

impl TaskFilter {
    /// Request path for `GET /tasks`, query parameters included
    pub fn tasks_path(&self) -> String {
        let mut params = Vec::new();
        if let Some(id) = self.category_id {
            params.push(format!("categoryId={id}"));
        }
        if let Some(completed) = self.completed {
            params.push(format!("isCompleted={completed}"));
        }
        if params.is_empty() {
            "/tasks".to_string()
        } else {
            format!("/tasks?{}", params.join("&"))
        }
    }
}
