// Application state for the desktop shell
// Built once in setup, handed to every command through Tauri's managed state

use parking_lot::RwLock;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tauri::AppHandle;

use tareas_core::storage::{attachmentsDir, configPath, dataDir, loadSettings, saveSettings, slotsDir};
use tareas_core::{AttachmentVault, FileSlots, Settings, TaskStore, View};

use crate::bridge::DesktopBridge;

pub struct AppStorage {
    pub view: View<DesktopBridge>,
    pub settings: RwLock<Settings>,
    pub configPath: PathBuf,
}

impl AppStorage {
    pub fn saveSettings(&self) -> Result<(), String> {
        let settings = self.settings.read().clone();
        saveSettings(&self.configPath, &settings)
    }
}

pub type StorageState = Arc<AppStorage>;

/// Load config, open the task slot and wire the view to the desktop bridge
pub fn initStorage(app: AppHandle) -> Result<StorageState, String> {
    tracing::info!("[initStorage] Initializing storage...");

    let configPath = configPath();
    let settings = loadSettings(&configPath);

    let dataDir = dataDir(&settings);
    fs::create_dir_all(&dataDir)
        .map_err(|e| format!("Failed to create data directory {}: {}", dataDir.display(), e))?;
    tracing::info!("[initStorage] Data directory: {}", dataDir.display());

    let store = TaskStore::open(FileSlots::new(slotsDir(&dataDir)), &settings.storageKey);
    let bridge = DesktopBridge::new(app, AttachmentVault::new(attachmentsDir(&dataDir)));
    let view = View::new(Arc::new(RwLock::new(store)), bridge, settings.defaultFilter);

    tracing::info!("[initStorage] Storage initialized successfully");
    Ok(Arc::new(AppStorage {
        view,
        settings: RwLock::new(settings),
        configPath,
    }))
}
