//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! read model: only the command loop writes board data into it.

use leptos::prelude::*;
use reactive_stores::Store;
use taskboard_core::board::BoardColumns;
use taskboard_core::domain::{Category, Task, TaskFilter, TaskId};
use taskboard_core::notice::Notice;
use taskboard_core::session::Session;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in identity; `None` shows the login screen
    pub session: Option<Session>,
    pub categories: Vec<Category>,
    /// Tasks split into To-Do / In-Progress / Completed
    pub columns: BoardColumns,
    /// Filter of the task list currently shown
    pub filter: TaskFilter,
    /// Notifications on screen
    pub notices: Vec<Notice>,
    /// Whether the task form is open
    pub form_open: bool,
    /// Task loaded into the form; `None` means create
    pub editing: Option<TaskId>,
    /// A command is being applied
    pub busy: bool,
}

impl AppState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Find a task in any column
pub fn store_find_task(store: &AppStore, id: TaskId) -> Option<Task> {
    store.columns().with_untracked(|columns| {
        [&columns.todo, &columns.in_progress, &columns.completed]
            .into_iter()
            .flatten()
            .find(|task| task.id == id)
            .cloned()
    })
}

/// Open the task form, for editing when `id` is given
pub fn store_open_form(store: &AppStore, id: Option<TaskId>) {
    store.editing().set(id);
    store.form_open().set(true);
}

pub fn store_close_form(store: &AppStore) {
    store.form_open().set(false);
    store.editing().set(None);
}

pub fn store_dismiss_notice(store: &AppStore, id: u64) {
    store.notices().write().retain(|notice| notice.id != id);
}
