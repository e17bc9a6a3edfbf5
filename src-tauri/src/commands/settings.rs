// Settings commands

use tauri::State;

use tareas_core::{Filter, Settings};
use crate::storage::StorageState;

#[derive(serde::Serialize)]
pub struct SettingsInfo {
    pub defaultFilter: Filter,
    pub confirmClearCompleted: bool,
    pub storageKey: String,
    pub dataDir: Option<String>,
}

impl From<Settings> for SettingsInfo {
    fn from(s: Settings) -> Self {
        Self {
            defaultFilter: s.defaultFilter,
            confirmClearCompleted: s.confirmClearCompleted,
            storageKey: s.storageKey,
            dataDir: s.dataDir,
        }
    }
}

#[tauri::command]
pub fn getSettings(storage: State<'_, StorageState>) -> SettingsInfo {
    storage.settings.read().clone().into()
}

#[derive(serde::Deserialize)]
pub struct UpdateSettingsInput {
    pub defaultFilter: Option<String>,
    pub confirmClearCompleted: Option<bool>,
    /// Takes effect on the next start
    pub dataDir: Option<String>,
}

#[tauri::command]
pub fn updateSettings(storage: State<'_, StorageState>, input: UpdateSettingsInput) -> Result<(), String> {
    tracing::info!("[updateSettings] Called");

    {
        let mut settings = storage.settings.write();
        if let Some(name) = input.defaultFilter {
            let filter = Filter::fromName(&name).ok_or_else(|| format!("Invalid filter: {}", name))?;
            tracing::info!("[updateSettings] Setting defaultFilter to: {}", filter.name());
            settings.defaultFilter = filter;
        }
        if let Some(confirm) = input.confirmClearCompleted {
            tracing::info!("[updateSettings] Setting confirmClearCompleted to: {}", confirm);
            settings.confirmClearCompleted = confirm;
        }
        if let Some(dir) = input.dataDir {
            tracing::info!("[updateSettings] Setting dataDir to: {} (applies after restart)", dir);
            settings.dataDir = if dir.trim().is_empty() { None } else { Some(dir) };
        }
    }

    storage.saveSettings()?;
    tracing::info!("[updateSettings] SUCCESS");
    Ok(())
}
