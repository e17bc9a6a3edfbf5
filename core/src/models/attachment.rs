// Attachment model
// A file copied into the private attachments folder on behalf of one task

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    /// Base name of the source file. Display only, may repeat.
    pub name: String,
    pub size: u64,
    /// Full path of the copy. Unique across the store; removal looks it up.
    pub path: String,
}

impl Attachment {
    pub fn new(id: String, name: String, size: u64, path: String) -> Self {
        Self { id, name, size, path }
    }

    /// Size rounded to whole kilobytes, never below 1
    pub fn sizeLabel(&self) -> String {
        let kb = (self.size as f64 / 1024.0).round() as u64;
        format!("{} KB", kb.max(1))
    }
}
