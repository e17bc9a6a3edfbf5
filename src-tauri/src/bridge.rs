// Desktop file bridge
// Native picker, vault copies on the blocking pool, and the OS default opener

use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;

use tareas_core::vault;
use tareas_core::{Attachment, AttachmentVault, FileBridge};

pub struct DesktopBridge {
    app: AppHandle,
    vault: AttachmentVault,
}

impl DesktopBridge {
    pub fn new(app: AppHandle, vault: AttachmentVault) -> Self {
        Self { app, vault }
    }
}

impl FileBridge for DesktopBridge {
    async fn importFiles(&self) -> Result<Vec<Attachment>, String> {
        let picked = rfd::AsyncFileDialog::new()
            .set_title("Adjuntar archivos")
            .pick_files()
            .await;

        let sources: Vec<PathBuf> = match picked {
            Some(files) => files.iter().map(|f| f.path().to_path_buf()).collect(),
            None => Vec::new(),
        };
        tracing::info!("[importFiles] {} files picked", sources.len());
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let vault = self.vault.clone();
        tauri::async_runtime::spawn_blocking(move || vault.importPaths(&sources))
            .await
            .map_err(|e| e.to_string())?
    }

    async fn openFile(&self, path: &str) -> Result<(), String> {
        if path.is_empty() {
            return Ok(());
        }
        tracing::info!("[openFile] {}", path);
        self.app.opener()
            .open_path(path, None::<&str>)
            .map_err(|e| e.to_string())
    }

    async fn deleteFile(&self, path: &str) -> bool {
        let path = path.to_string();
        tauri::async_runtime::spawn_blocking(move || vault::deleteFile(&path))
            .await
            .unwrap_or(false)
    }
}
