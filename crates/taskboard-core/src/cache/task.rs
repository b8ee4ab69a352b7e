//! Task Cache & Filter Engine
//!
//! In-memory mirror of the last task list fetched from the server, plus the
//! classification into board columns.

use tracing::debug;

use super::entity_cache::EntityCache;
use crate::board::BoardColumns;
use crate::domain::{Task, TaskFilter, TaskId};
use crate::error::BoardResult;
use crate::gateway::{ApiGateway, Transport};
use crate::session::SessionStore;

#[derive(Debug, Default, Clone)]
pub struct TaskCache {
    entries: EntityCache<Task>,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch tasks matching `filter` and replace the local list.
    ///
    /// On failure the previous list is left untouched.
    pub async fn refresh<T: Transport, S: SessionStore>(
        &mut self,
        gateway: &ApiGateway<T, S>,
        filter: &TaskFilter,
    ) -> BoardResult<()> {
        let tasks = gateway.list_tasks(filter).await?;
        debug!(count = tasks.len(), ?filter, "tasks refreshed");
        self.entries.replace_all(tasks);
        Ok(())
    }

    /// Partition the cache into To-Do, In-Progress and Completed.
    ///
    /// Every task lands in exactly one column, chosen by its effective
    /// status. Server order is kept within each column.
    pub fn classify(&self) -> BoardColumns {
        BoardColumns::from_tasks(self.entries.iter())
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
