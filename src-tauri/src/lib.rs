// Allow non-snake_case names for JSON serialization compatibility with the webview
#![allow(non_snake_case)]

mod bridge;
mod commands;
mod storage;

use tauri::{Manager, RunEvent};
use tracing_subscriber::EnvFilter;

fn initLogging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    initLogging();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let storage = storage::initStorage(app.handle().clone())?;
            tracing::info!("[setup] {} tasks loaded", storage.view.store().read().len());
            app.manage(storage);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Tasks
            commands::tasks::getView,
            commands::tasks::dispatch,
            commands::tasks::clearCompleted,
            commands::tasks::showMainWindow,
            // Attachments
            commands::attachments::attachFiles,
            commands::attachments::openAttachment,
            commands::attachments::removeAttachment,
            // Settings
            commands::settings::getSettings,
            commands::settings::updateSettings,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|handle, event| {
        if let RunEvent::Exit = event {
            // Every mutation is already on disk; dropping the state is all that is left
            if let Some(storage) = handle.try_state::<storage::StorageState>() {
                tracing::info!("[run] Shutting down with {} tasks", storage.view.store().read().len());
            }
        }
    });
}
