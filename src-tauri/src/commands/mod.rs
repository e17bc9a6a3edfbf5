// Commands module - exports all command handlers
// Submodules must be public for Tauri's generate_handler! macro

pub mod attachments;
pub mod settings;
pub mod tasks;
