//! UI Components
//!
//! Reusable Leptos components.

mod board_view;
mod category_panel;
mod delete_confirm_button;
mod filter_bar;
mod login_form;
mod notification_toast;
mod task_card;
mod task_column;
mod task_form;
mod title_bar;

pub use board_view::BoardView;
pub use category_panel::CategoryPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use login_form::LoginForm;
pub use notification_toast::NotificationToast;
pub use task_card::TaskCard;
pub use task_column::TaskColumn;
pub use task_form::TaskForm;
pub use title_bar::TitleBar;
