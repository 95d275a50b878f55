//! UI Components
//!
//! Leptos views for the landing page and the task list.

mod auth_landing;
mod category_panel;
mod delete_confirm_button;
mod session_gate;
mod sync_banner;
mod task_form;
mod task_row;
mod todo_list;

pub use auth_landing::AuthLanding;
pub use category_panel::CategoryPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use session_gate::{GateDecision, SessionGate};
pub use sync_banner::SyncBanner;
pub use task_form::TaskForm;
pub use task_row::TaskRow;
pub use todo_list::{TodoController, TodoList};
