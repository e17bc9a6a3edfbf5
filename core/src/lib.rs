// Tareas core: task list state, persistence and attachment storage
// Field and function names are camelCase to match the webview's JSON

#![allow(non_snake_case)]

pub mod bridge;
pub mod common;
pub mod models;
pub mod storage;
pub mod store;
pub mod vault;
pub mod view;

pub use bridge::FileBridge;
pub use models::{Attachment, Direction, Filter, Settings, Stats, Task};
pub use storage::{FileSlots, MemorySlots, SlotStore};
pub use store::TaskStore;
pub use vault::AttachmentVault;
pub use view::{Intent, SharedTaskStore, View, ViewSnapshot};
