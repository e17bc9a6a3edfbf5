// Models for the task list and its configuration
// Field names are camelCase so the persisted JSON and the webview share one shape

pub mod attachment;
pub mod common;
pub mod config;
pub mod task;

pub use attachment::Attachment;
pub use common::{Direction, Filter, Stats};
pub use config::Settings;
pub use task::Task;
