use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Owns the transient uploads directory. Each saved upload gets a
/// UUID-prefixed name so concurrent requests with the same client filename
/// never collide on disk.
#[derive(Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the bytes under a sanitized, per-request unique name. The
    /// returned guard deletes the file when dropped, on every exit path.
    /// The guard is constructed before the write so a partially created
    /// file is removed even when the write itself fails.
    pub fn save(&self, filename: Option<&str>, bytes: &[u8]) -> io::Result<UploadGuard> {
        let name = sanitize_filename(filename.unwrap_or_default());
        let guard = UploadGuard {
            path: self.dir.join(format!("{}_{}", Uuid::new_v4(), name)),
        };
        fs::write(guard.path(), bytes)?;
        Ok(guard)
    }
}

/// Scoped ownership of one on-disk upload. The file never outlives the guard.
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Failed to remove upload {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Reduces a client-supplied filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` is dropped.
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
