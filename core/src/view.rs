// View model: the active filter, snapshots for rendering, and intent dispatch
// Every user gesture maps to exactly one store or bridge call

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::bridge::FileBridge;
use crate::models::{Attachment, Direction, Filter, Stats, Task};
use crate::store::TaskStore;

pub type SharedTaskStore = Arc<RwLock<TaskStore>>;

/// Synchronous gestures coming from the webview. Bulk clear is not one of
/// them: it goes through `View::clearCompleted` once the host has asked the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    Add { text: String },
    Toggle { id: String },
    Remove { id: String },
    StartEdit { id: String },
    CancelEdit { id: String },
    SaveEdit { id: String, text: String },
    Move { id: String, direction: Direction },
    SetFilter { filter: Filter },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentRow {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub sizeLabel: String,
    pub path: String,
}

impl From<&Attachment> for AttachmentRow {
    fn from(a: &Attachment) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            size: a.size,
            sizeLabel: a.sizeLabel(),
            path: a.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub editing: bool,
    pub createdAt: i64,
    pub createdLabel: String,
    pub attachments: Vec<AttachmentRow>,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id.clone(),
            text: t.text.clone(),
            done: t.done,
            editing: t.editing,
            createdAt: t.createdAt,
            createdLabel: t.createdLabel(),
            attachments: t.attachments.iter().map(AttachmentRow::from).collect(),
        }
    }
}

/// Everything the page needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub filter: Filter,
    pub stats: Stats,
    pub tasks: Vec<TaskRow>,
}

pub struct View<B> {
    store: SharedTaskStore,
    bridge: B,
    filter: RwLock<Filter>,
}

impl<B: FileBridge> View<B> {
    pub fn new(store: SharedTaskStore, bridge: B, filter: Filter) -> Self {
        Self {
            store,
            bridge,
            filter: RwLock::new(filter),
        }
    }

    pub fn store(&self) -> &SharedTaskStore {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        *self.filter.read()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let filter = self.filter();
        let store = self.store.read();
        ViewSnapshot {
            filter,
            stats: store.stats(),
            tasks: store.filtered(filter).into_iter().map(TaskRow::from).collect(),
        }
    }

    pub fn dispatch(&self, intent: Intent) -> ViewSnapshot {
        tracing::debug!("[View::dispatch] {:?}", intent);
        match intent {
            Intent::SetFilter { filter } => {
                *self.filter.write() = filter;
            }
            intent => {
                let mut store = self.store.write();
                match intent {
                    Intent::Add { text } => {
                        store.add(&text);
                    }
                    Intent::Toggle { id } => {
                        store.toggle(&id);
                    }
                    Intent::Remove { id } => {
                        store.remove(&id);
                    }
                    Intent::StartEdit { id } => {
                        store.startEdit(&id);
                    }
                    Intent::CancelEdit { id } => {
                        store.cancelEdit(&id);
                    }
                    Intent::SaveEdit { id, text } => {
                        store.saveEdit(&id, &text);
                    }
                    Intent::Move { id, direction } => {
                        store.moveTask(&id, direction);
                    }
                    Intent::SetFilter { .. } => {}
                }
            }
        }
        self.snapshot()
    }

    /// Remove every completed task, but only once the user has confirmed
    pub fn clearCompleted(&self, confirmed: bool) -> ViewSnapshot {
        if confirmed {
            self.store.write().clearCompleted();
        } else {
            tracing::info!("[View::clearCompleted] Not confirmed, skipping");
        }
        self.snapshot()
    }

    /// Pick files for task `id` and append whatever was imported.
    /// An import error leaves the store untouched.
    pub async fn attachTo(&self, id: &str) -> Result<ViewSnapshot, String> {
        let picked = self.bridge.importFiles().await?;
        if picked.is_empty() {
            tracing::debug!("[View::attachTo] Nothing picked for {}", id);
            return Ok(self.snapshot());
        }

        self.store.write().addAttachments(id, picked);
        Ok(self.snapshot())
    }

    pub async fn openAttachment(&self, path: &str) {
        if let Err(e) = self.bridge.openFile(path).await {
            tracing::warn!("[View::openAttachment] {}: {}", path, e);
        }
    }

    /// Delete the file, then drop the entry from the task. The entry goes even
    /// when the delete reports failure, so the model can outlive a stuck file.
    pub async fn removeAttachment(&self, id: &str, path: &str) -> ViewSnapshot {
        let deleted = self.bridge.deleteFile(path).await;
        if !deleted {
            tracing::warn!("[View::removeAttachment] Delete failed for {}, removing entry anyway", path);
        }

        self.store.write().removeAttachment(id, path);
        self.snapshot()
    }
}
