// Filesystem-backed persistence for Tareas
// Named key-value slots for the task list, plus the markdown config file

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Settings;

// ============================================
// PATH HELPERS
// ============================================

/// Global config directory (~/.tareas/)
pub fn configDir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".tareas")
}

/// Global config file path
pub fn configPath() -> PathBuf {
    configDir().join("config.md")
}

/// Root for slots and attachments; `dataDir` in config wins over the default
pub fn dataDir(settings: &Settings) -> PathBuf {
    match &settings.dataDir {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => configDir(),
    }
}

/// Directory holding one JSON file per slot
pub fn slotsDir(dataDir: &Path) -> PathBuf {
    dataDir.join("store")
}

/// Private folder imported attachments are copied into
pub fn attachmentsDir(dataDir: &Path) -> PathBuf {
    dataDir.join("attachments")
}

// ============================================
// FRONTMATTER PARSING
// ============================================

/// Parse YAML frontmatter from markdown content
pub fn parseFrontmatter<T: serde::de::DeserializeOwned>(content: &str) -> Option<(T, String)> {
    let content = content.trim();
    let rest = content.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    let yaml = rest[..end].trim();
    let body = rest[end + 4..].trim().to_string();

    let frontmatter: T = serde_yaml::from_str(yaml).ok()?;
    Some((frontmatter, body))
}

/// Serialize frontmatter + body to markdown
pub fn toMarkdown<T: serde::Serialize>(frontmatter: &T, body: &str) -> Result<String, String> {
    let yaml = serde_yaml::to_string(frontmatter)
        .map_err(|e| format!("YAML error: {}", e))?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

// ============================================
// CONFIG
// ============================================

/// Load settings; a missing file or unreadable frontmatter yields defaults
pub fn loadSettings(path: &Path) -> Settings {
    tracing::debug!("[loadSettings] Config path: {:?}", path);

    if !path.exists() {
        tracing::info!("[loadSettings] Config file does not exist, using defaults");
        return Settings::default();
    }

    let content = fs::read_to_string(path).unwrap_or_default();
    match parseFrontmatter::<Settings>(&content) {
        Some((settings, _)) => settings,
        None => {
            tracing::warn!("[loadSettings] Failed to parse frontmatter, using defaults");
            Settings::default()
        }
    }
}

pub fn saveSettings(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let body = "# Tareas\n\nSettings live in the frontmatter above.\n";
    let content = toMarkdown(settings, body)?;
    fs::write(path, content).map_err(|e| e.to_string())
}

// ============================================
// SLOTS
// ============================================

/// Named slots holding one serialized value each, overwritten wholesale
pub trait SlotStore: Send + Sync {
    /// `None` when the slot was never written or cannot be read
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
}

/// One `<key>.json` file per slot under a directory
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slotPath(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SlotStore for FileSlots {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.slotPath(key);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::debug!("[FileSlots::read] {:?} not readable: {}", path, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;

        // Sibling temp file renamed over the slot; readers see the old or the new list
        let path = self.slotPath(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).map_err(|e| format!("Failed to write {:?}: {}", tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| format!("Failed to replace {:?}: {}", path, e))
    }
}

/// In-process slots; nothing survives the process
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let slots = Self::new();
        slots.slots.write().insert(key.to_string(), value.to_string());
        slots
    }
}

impl SlotStore for MemorySlots {
    fn read(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> SlotStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        (**self).write(key, value)
    }
}
