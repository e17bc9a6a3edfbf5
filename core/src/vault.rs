// Attachment vault: the file-system half of the file bridge
// Copies picked files into the private folder and deletes them again

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::attachmentToken;
use crate::models::Attachment;

/// Private per-installation folder holding attachment copies
#[derive(Debug, Clone)]
pub struct AttachmentVault {
    dir: PathBuf,
}

impl AttachmentVault {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy each source into the vault, in order. The first failure aborts the batch;
    /// copies made before it stay on disk and are not reported.
    pub fn importPaths(&self, sources: &[PathBuf]) -> Result<Vec<Attachment>, String> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| format!("Failed to create {}: {}", self.dir.display(), e))?;

        let mut saved = Vec::with_capacity(sources.len());
        for source in sources {
            saved.push(self.importOne(source)?);
        }
        tracing::info!("[AttachmentVault::importPaths] Copied {} files into {}", saved.len(), self.dir.display());
        Ok(saved)
    }

    fn importOne(&self, source: &Path) -> Result<Attachment, String> {
        let name = source.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| format!("Not a file: {}", source.display()))?;

        let token = attachmentToken();
        let dest = self.dir.join(format!("{}__{}", token, name));

        fs::copy(source, &dest).map_err(|e| {
            tracing::error!("[AttachmentVault::importOne] {} -> {}: {}", source.display(), dest.display(), e);
            format!("Failed to copy {}: {}", source.display(), e)
        })?;
        let size = fs::metadata(&dest)
            .map_err(|e| format!("Failed to stat {}: {}", dest.display(), e))?
            .len();

        Ok(Attachment::new(token, name, size, dest.to_string_lossy().to_string()))
    }
}

/// Delete `path`. Empty or already-missing paths count as deleted;
/// any other failure is reported as `false`, never raised.
pub fn deleteFile(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }

    let target = Path::new(path);
    if !target.exists() {
        tracing::debug!("[deleteFile] {} already gone", path);
        return true;
    }

    match fs::remove_file(target) {
        Ok(()) => {
            tracing::info!("[deleteFile] Deleted {}", path);
            true
        }
        Err(e) => {
            tracing::warn!("[deleteFile] Could not delete {}: {}", path, e);
            false
        }
    }
}
