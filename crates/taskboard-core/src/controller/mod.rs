//! Board Controller
//!
//! Owns the explicit board state and applies one [`BoardCommand`] at a time.
//! Every mutation goes to the server first and is followed by a refresh of
//! the affected cache; the local copy is never patched optimistically. Once
//! the server has committed a mutation its success notice is shown, and a
//! failed follow-up refresh is reported as a separate error.
//!
//! Callers must serialize commands. The browser app feeds them through a
//! single queue consumer, so two refreshes never race on the caches.

use tracing::{debug, info, warn};

use crate::board::BoardColumns;
use crate::cache::{CategoryCache, TaskCache};
use crate::dnd::{resolve_drop, DropIntent, DropOutcome};
use crate::domain::{CategoryId, NewCategory, TaskDraft, TaskFilter, TaskId};
use crate::error::{BoardError, BoardResult};
use crate::gateway::{ApiGateway, Transport};
use crate::notice::{Notice, NoticeQueue};
use crate::session::SessionStore;


// ========================
// Notice Texts
// ========================

pub const TASK_CREATED: &str = "Task created successfully!";
pub const TASK_UPDATED: &str = "Task updated successfully!";
pub const TASK_DELETED: &str = "Task deleted successfully!";
pub const TASK_TOGGLED: &str = "Task status updated!";
pub const TASK_MOVED: &str = "Task moved successfully!";
pub const TASK_MOVE_FAILED: &str = "Failed to move task";
pub const CATEGORY_CREATED: &str = "Category created successfully!";
pub const CATEGORY_DELETED: &str = "Category deleted successfully!";

/// Everything the board renders from
#[derive(Debug, Default, Clone)]
pub struct BoardState {
    pub categories: CategoryCache,
    pub tasks: TaskCache,
    /// Filter applied to the next task refresh
    pub filter: TaskFilter,
    pub notices: NoticeQueue,
}

impl BoardState {
    pub fn columns(&self) -> BoardColumns {
        self.tasks.classify()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    /// Exchange credentials for a session, then load the board
    Login {
        username_or_email: String,
        password: String,
    },
    /// Initial load: categories, then tasks
    Load,
    SetCategoryFilter(Option<CategoryId>),
    SetCompletionFilter(Option<bool>),
    CreateCategory(NewCategory),
    DeleteCategory(CategoryId),
    /// Create when `target` is `None`, otherwise full update of `target`
    SubmitTask {
        target: Option<TaskId>,
        draft: TaskDraft,
    },
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    MoveTask(DropIntent),
    Logout,
}

impl BoardCommand {
    fn name(&self) -> &'static str {
        match self {
            BoardCommand::Login { .. } => "login",
            BoardCommand::Load => "load",
            BoardCommand::SetCategoryFilter(_) => "set_category_filter",
            BoardCommand::SetCompletionFilter(_) => "set_completion_filter",
            BoardCommand::CreateCategory(_) => "create_category",
            BoardCommand::DeleteCategory(_) => "delete_category",
            BoardCommand::SubmitTask { .. } => "submit_task",
            BoardCommand::ToggleTask(_) => "toggle_task",
            BoardCommand::DeleteTask(_) => "delete_task",
            BoardCommand::MoveTask(_) => "move_task",
            BoardCommand::Logout => "logout",
        }
    }
}

/// What the caller should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The command was rejected before the server committed anything; an
    /// error notice explains why
    Failed,
    /// The session is gone; show the login screen
    SignedOut,
}

pub struct BoardController<T, S> {
    gateway: ApiGateway<T, S>,
    state: BoardState,
}

impl<T: Transport, S: SessionStore> BoardController<T, S> {
    pub fn new(gateway: ApiGateway<T, S>) -> Self {
        Self {
            gateway,
            state: BoardState::default(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn gateway(&self) -> &ApiGateway<T, S> {
        &self.gateway
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    /// Notices produced since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.notices.drain()
    }

    /// Form prefill for editing a cached task
    pub fn edit_draft(&self, id: TaskId) -> BoardResult<TaskDraft> {
        self.state
            .tasks
            .get(id)
            .map(TaskDraft::from_task)
            .ok_or(BoardError::NotFound { entity: "task", id })
    }

    /// Apply one command.
    ///
    /// Failures become error notices. A rejected credential ends the session
    /// without a notice and wipes the caches.
    pub async fn dispatch(&mut self, command: BoardCommand) -> Flow {
        let name = command.name();
        debug!(command = name, "dispatch");

        let result = match command {
            BoardCommand::Login { username_or_email, password } => self.login(&username_or_email, &password).await,
            BoardCommand::Load => self.load().await,
            BoardCommand::SetCategoryFilter(category_id) => {
                self.apply_filter(TaskFilter { category_id, ..self.state.filter }).await
            }
            BoardCommand::SetCompletionFilter(completed) => {
                self.apply_filter(TaskFilter { completed, ..self.state.filter }).await
            }
            BoardCommand::CreateCategory(category) => self.create_category(&category).await,
            BoardCommand::DeleteCategory(id) => self.delete_category(id).await,
            BoardCommand::SubmitTask { target, draft } => self.submit_task(target, &draft).await,
            BoardCommand::ToggleTask(id) => self.toggle_task(id).await,
            BoardCommand::DeleteTask(id) => self.delete_task(id).await,
            BoardCommand::MoveTask(intent) => self.move_task(intent).await,
            BoardCommand::Logout => {
                self.gateway.logout();
                return self.sign_out();
            }
        };

        match result {
            Ok(()) => Flow::Continue,
            Err(err) if err.is_unauthorized() => {
                info!(command = name, "session ended");
                self.sign_out()
            }
            Err(err) => {
                warn!(command = name, error = %err, "command failed");
                self.state.notices.error(err.user_message());
                Flow::Failed
            }
        }
    }

    fn sign_out(&mut self) -> Flow {
        let notices = std::mem::take(&mut self.state.notices);
        self.state = BoardState {
            notices,
            ..BoardState::default()
        };
        Flow::SignedOut
    }

    // ========================
    // Loading & Filtering
    // ========================

    /// A rejected login is reported like any other failure
    async fn login(&mut self, username_or_email: &str, password: &str) -> BoardResult<()> {
        let username_or_email = username_or_email.trim();
        if username_or_email.is_empty() || password.is_empty() {
            return Err(BoardError::Validation("Username and password are required".into()));
        }
        self.gateway.login(username_or_email, password).await?;
        self.state = BoardState {
            notices: std::mem::take(&mut self.state.notices),
            ..BoardState::default()
        };
        self.load().await
    }

    /// A category failure does not block the task list, unless the session
    /// is gone.
    async fn load(&mut self) -> BoardResult<()> {
        let categories = self.state.categories.refresh(&self.gateway).await;
        if let Err(err) = &categories {
            if err.is_unauthorized() {
                return categories;
            }
            self.state.notices.error(err.user_message());
        }
        self.state.tasks.refresh(&self.gateway, &self.state.filter).await
    }

    /// The filter only changes once the refresh succeeded
    async fn apply_filter(&mut self, filter: TaskFilter) -> BoardResult<()> {
        self.state.tasks.refresh(&self.gateway, &filter).await?;
        self.state.filter = filter;
        Ok(())
    }

    // ========================
    // Categories
    // ========================

    async fn create_category(&mut self, category: &NewCategory) -> BoardResult<()> {
        let failures = self.state.categories.create(&self.gateway, category).await?;
        self.state.notices.success(CATEGORY_CREATED);
        self.report_all(failures);
        Ok(())
    }

    /// A filter pointing at the deleted category is reset
    async fn delete_category(&mut self, id: CategoryId) -> BoardResult<()> {
        let mut filter = self.state.filter;
        if filter.category_id == Some(id) {
            filter.category_id = None;
        }
        let BoardState { categories, tasks, .. } = &mut self.state;
        let failures = categories.delete(&self.gateway, id, tasks, &filter).await?;
        self.state.filter = filter;
        self.state.notices.success(CATEGORY_DELETED);
        self.report_all(failures);
        Ok(())
    }

    // ========================
    // Tasks
    // ========================

    async fn submit_task(&mut self, target: Option<TaskId>, draft: &TaskDraft) -> BoardResult<()> {
        let payload = draft.validated()?;
        match target {
            Some(id) => {
                self.gateway.update_task(id, &payload).await?;
                info!(id, "task updated");
                self.state.notices.success(TASK_UPDATED);
            }
            None => {
                let created = self.gateway.create_task(&payload).await?;
                info!(id = created.id, "task created");
                self.state.notices.success(TASK_CREATED);
            }
        }
        self.refresh_after_commit().await
    }

    async fn toggle_task(&mut self, id: TaskId) -> BoardResult<()> {
        self.gateway.toggle_task(id).await?;
        self.state.notices.success(TASK_TOGGLED);
        self.refresh_after_commit().await
    }

    async fn delete_task(&mut self, id: TaskId) -> BoardResult<()> {
        self.gateway.delete_task(id).await?;
        info!(id, "task deleted");
        self.state.notices.success(TASK_DELETED);
        self.refresh_after_commit().await
    }

    /// Same-column drops never reach the network. Otherwise one status
    /// update, then one full refresh.
    async fn move_task(&mut self, intent: DropIntent) -> BoardResult<()> {
        let (task_id, from, to) = match resolve_drop(intent, &self.state.tasks) {
            DropOutcome::Commit { task_id, from, to } => (task_id, from, to),
            DropOutcome::NoOp(reason) => {
                debug!(task_id = intent.task_id, ?reason, "drop is a no-op");
                return Ok(());
            }
        };

        self.gateway
            .update_task_status(task_id, to)
            .await
            .map_err(|err| BoardError::from(err).during(TASK_MOVE_FAILED))?;
        info!(task_id, %from, %to, "task moved");
        self.state.notices.success(TASK_MOVED);
        self.refresh_after_commit().await
    }

    /// Task refresh following a committed mutation. Only a lost session
    /// fails the command; anything else becomes its own error notice.
    async fn refresh_after_commit(&mut self) -> BoardResult<()> {
        match self.state.tasks.refresh(&self.gateway, &self.state.filter).await {
            Err(err) if !err.is_unauthorized() => {
                self.report_all(vec![err]);
                Ok(())
            }
            other => other,
        }
    }

    fn report_all(&mut self, failures: Vec<BoardError>) {
        for err in failures {
            warn!(error = %err, "refresh after commit failed");
            self.state.notices.error(err.user_message());
        }
    }
}
