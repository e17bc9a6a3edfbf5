// Task model
// One to-do item; the whole list is persisted as a JSON array of these

use serde::{Deserialize, Serialize};

use super::attachment::Attachment;
use crate::common::{newId, now};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub createdAt: i64,
    /// Inline editor open. Persisted, but only meaningful while the UI runs.
    #[serde(default)]
    pub editing: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Task {
    /// Build a task from user input. Returns `None` when the text trims to nothing.
    pub fn new(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: newId(),
            text: text.to_string(),
            done: false,
            createdAt: now(),
            editing: false,
            attachments: Vec::new(),
        })
    }

    pub fn hasAttachment(&self, path: &str) -> bool {
        self.attachments.iter().any(|a| a.path == path)
    }

    /// Local date-time the task was created, for display
    pub fn createdLabel(&self) -> String {
        use chrono::{Local, TimeZone};
        match Local.timestamp_millis_opt(self.createdAt).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => String::new(),
        }
    }
}
