// Attachment commands
// The page never touches the file system; it names a task or a stored path

use tauri::State;

use tareas_core::ViewSnapshot;
use crate::storage::StorageState;

#[tauri::command]
pub async fn attachFiles(storage: State<'_, StorageState>, id: String) -> Result<ViewSnapshot, String> {
    tracing::info!("[attachFiles] Called for task {}", id);
    storage.view.attachTo(&id).await.map_err(|e| {
        tracing::error!("[attachFiles] ERROR: {}", e);
        e
    })
}

#[tauri::command]
pub async fn openAttachment(storage: State<'_, StorageState>, path: String) -> Result<(), String> {
    storage.view.openAttachment(&path).await;
    Ok(())
}

#[tauri::command]
pub async fn removeAttachment(storage: State<'_, StorageState>, id: String, path: String) -> Result<ViewSnapshot, String> {
    tracing::info!("[removeAttachment] Called for task {}, path {}", id, path);
    Ok(storage.view.removeAttachment(&id, &path).await)
}
