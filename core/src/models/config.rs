// Configuration model
// Stored as YAML frontmatter in ~/.tareas/config.md

use serde::{Deserialize, Serialize};

use super::common::Filter;

pub const DEFAULT_STORAGE_KEY: &str = "todoapp_v1_tasks";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filter selected when the window opens
    pub defaultFilter: Filter,
    /// Ask before clearing completed tasks
    pub confirmClearCompleted: bool,
    /// Slot name holding the serialized task list
    pub storageKey: String,
    /// Overrides the data directory (defaults to the config directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataDir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            defaultFilter: Filter::All,
            confirmClearCompleted: true,
            storageKey: DEFAULT_STORAGE_KEY.to_string(),
            dataDir: None,
        }
    }
}
