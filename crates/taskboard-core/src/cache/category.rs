//! Category Cache
//!
//! In-memory mirror of the server's category list. Every mutation goes to
//! the server first and is followed by a full refresh.

use tracing::{debug, info};

use super::entity_cache::EntityCache;
use super::task::TaskCache;
use crate::domain::{Category, CategoryId, NewCategory, TaskFilter};
use crate::error::{BoardError, BoardResult};
use crate::gateway::{ApiGateway, Transport};
use crate::session::SessionStore;

#[derive(Debug, Default, Clone)]
pub struct CategoryCache {
    entries: EntityCache<Category>,
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch all categories and replace the local list.
    ///
    /// On failure the previous list is left untouched.
    pub async fn refresh<T: Transport, S: SessionStore>(&mut self, gateway: &ApiGateway<T, S>) -> BoardResult<()> {
        let categories = gateway.list_categories().await?;
        debug!(count = categories.len(), "categories refreshed");
        self.entries.replace_all(categories);
        Ok(())
    }

    /// Create on the server, then refresh.
    ///
    /// `Err` means nothing was created. Once the server has the category a
    /// failed refresh comes back in the returned list instead, unless the
    /// session ended.
    pub async fn create<T: Transport, S: SessionStore>(
        &mut self,
        gateway: &ApiGateway<T, S>,
        category: &NewCategory,
    ) -> BoardResult<Vec<BoardError>> {
        let payload = category.validated()?;
        let created = gateway.create_category(&payload).await?;
        info!(id = created.id, name = %created.name, "category created");

        let mut failures = Vec::new();
        collect_failure(self.refresh(gateway).await, &mut failures)?;
        Ok(failures)
    }

    /// Delete on the server, then refresh categories and tasks.
    ///
    /// The server nulls out task references to the deleted category, so the
    /// task cache is re-fetched even when the category refresh fails. `Err`
    /// means the delete itself was rejected or the session ended.
    pub async fn delete<T: Transport, S: SessionStore>(
        &mut self,
        gateway: &ApiGateway<T, S>,
        id: CategoryId,
        tasks: &mut TaskCache,
        filter: &TaskFilter,
    ) -> BoardResult<Vec<BoardError>> {
        gateway.delete_category(id).await?;
        info!(id, "category deleted");

        let mut failures = Vec::new();
        collect_failure(self.refresh(gateway).await, &mut failures)?;
        collect_failure(tasks.refresh(gateway, filter).await, &mut failures)?;
        Ok(failures)
    }

    /// Snapshot for selectors
    pub fn to_vec(&self) -> Vec<Category> {
        self.entries.to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keep a follow-up failure for the caller; only a lost session aborts
fn collect_failure(result: BoardResult<()>, failures: &mut Vec<BoardError>) -> BoardResult<()> {
    match result {
        Err(err) if !err.is_unauthorized() => {
            failures.push(err);
            Ok(())
        }
        other => other,
    }
}
