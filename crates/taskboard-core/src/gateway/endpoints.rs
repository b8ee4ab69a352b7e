//! Typed Resource Endpoints
//!
//! One method per remote operation consumed by the board.

use super::client::ApiGateway;
use super::transport::{HttpMethod, Transport};
use crate::domain::{Category, CategoryId, NewCategory, Task, TaskDraft, TaskFilter, TaskId, TaskStatus};
use crate::error::ApiError;
use crate::session::SessionStore;

// ========================
// Category Endpoints
// ========================

impl<T: Transport, S: SessionStore> ApiGateway<T, S> {
    /// `GET /categories`
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories").await
    }

    /// `POST /categories`
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.send_json(HttpMethod::Post, "/categories", category).await
    }

    /// `DELETE /categories/{id}`
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.send_ack(HttpMethod::Delete, &format!("/categories/{id}")).await
    }

    // ========================
    // Task Endpoints
    // ========================

    /// `GET /tasks?categoryId=&isCompleted=`
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.get(&filter.tasks_path()).await
    }

    /// `POST /tasks`
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.send_json(HttpMethod::Post, "/tasks", draft).await
    }

    /// `PUT /tasks/{id}`
    pub async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.send_json(HttpMethod::Put, &format!("/tasks/{id}"), draft).await
    }

    /// `PATCH /tasks/{id}/status?status=`
    pub async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> Result<(), ApiError> {
        self.send_ack(HttpMethod::Patch, &format!("/tasks/{id}/status?status={status}"))
            .await
    }

    /// `PATCH /tasks/{id}/toggle`
    pub async fn toggle_task(&self, id: TaskId) -> Result<(), ApiError> {
        self.send_ack(HttpMethod::Patch, &format!("/tasks/{id}/toggle")).await
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        self.send_ack(HttpMethod::Delete, &format!("/tasks/{id}")).await
    }
}
