// Task list commands
// Each returns the fresh snapshot so the page re-renders from one source

use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use tauri::{Manager, State};

use tareas_core::{Intent, ViewSnapshot};
use crate::storage::StorageState;

#[tauri::command]
pub fn getView(storage: State<'_, StorageState>) -> ViewSnapshot {
    storage.view.snapshot()
}

#[tauri::command]
pub fn dispatch(storage: State<'_, StorageState>, intent: Intent) -> ViewSnapshot {
    storage.view.dispatch(intent)
}

/// Bulk clear, gated behind a native yes/no dialog unless disabled in config
#[tauri::command]
pub async fn clearCompleted(storage: State<'_, StorageState>) -> Result<ViewSnapshot, String> {
    let mustConfirm = storage.settings.read().confirmClearCompleted;

    let confirmed = if mustConfirm {
        let answer = AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Limpiar hechas")
            .set_description("¿Borrar todas las tareas completadas?")
            .set_buttons(MessageButtons::YesNo)
            .show()
            .await;
        matches!(answer, MessageDialogResult::Yes)
    } else {
        true
    };
    tracing::info!("[clearCompleted] confirmed: {}", confirmed);

    Ok(storage.view.clearCompleted(confirmed))
}

/// Called by the page after its first render; the window starts hidden
#[tauri::command]
pub fn showMainWindow(app: tauri::AppHandle) -> Result<(), String> {
    let window = app.get_webview_window("main").ok_or("Main window not found")?;
    window.show().map_err(|e| e.to_string())?;
    window.set_focus().map_err(|e| e.to_string())
}
