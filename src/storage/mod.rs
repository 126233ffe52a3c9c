use crate::models::User;
use crate::utils::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence boundary for the user collection.
///
/// The store writes the whole collection through `save` after every
/// mutation and reads it back once at startup through `load`. Implementors
/// hold a single serialized blob under one fixed name; there is no
/// incremental form.
pub trait SnapshotStorage: Send + Sync {
    /// Reads the persisted snapshot. `Ok(None)` means no snapshot exists
    /// yet (first run); an unparsable snapshot is an error, not absence.
    fn load(&self) -> Result<Option<Vec<User>>, AppError>;

    /// Rewrites the snapshot with the full collection.
    fn save(&self, users: &[User]) -> Result<(), AppError>;
}

/// File-backed snapshot: one JSON array in one file.
#[derive(Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SnapshotStorage for SnapshotFile {
    fn load(&self) -> Result<Option<Vec<User>>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| AppError::StorageError(format!("Failed to read snapshot: {}", e)))?;

        // A file that exists but holds nothing counts as no snapshot
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let users: Vec<User> = serde_json::from_str(&raw)
            .map_err(|e| AppError::StorageError(format!("Malformed snapshot: {}", e)))?;

        Ok(Some(users))
    }

    fn save(&self, users: &[User]) -> Result<(), AppError> {
        let raw = serde_json::to_string(users)
            .map_err(|e| AppError::StorageError(format!("Failed to serialize snapshot: {}", e)))?;

        fs::write(&self.path, raw)
            .map_err(|e| AppError::StorageError(format!("Failed to write snapshot: {}", e)))?;

        Ok(())
    }
}
