//! Domain Layer
//!
//! Records mirrored from the remote API and the payloads sent back to it.

mod category;
mod entity;
mod filter;
mod task;

pub use category::{Category, CategoryId, CategoryRef, NewCategory, DEFAULT_COLOR};
pub use entity::Entity;
pub use filter::TaskFilter;
pub use task::{resolve_status, Priority, Task, TaskDraft, TaskId, TaskStatus};
