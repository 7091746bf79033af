use super::backend::{StorageBackend, ensure_within_quota, validate_key};
use crate::error::{NotesError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = "json";

/// File-per-key storage: the value of key `K` lives in `<root>/K.json`.
pub struct FsBackend {
    root: PathBuf,
    quota_bytes: u64,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            quota_bytes: 0,
        }
    }

    /// Limit total stored bytes across all keys. Zero means unlimited.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = bytes;
        self
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, ITEM_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| unavailable(&self.root, e))?;
        }
        Ok(())
    }

    fn used_by_others(&self, key: &str) -> Result<u64> {
        let mut total = 0;
        for other in self.keys()? {
            if other == key {
                continue;
            }
            let meta = fs::metadata(self.item_path(&other)).map_err(NotesError::Io)?;
            total += meta.len();
        }
        Ok(total)
    }
}

fn unavailable(path: &Path, err: io::Error) -> NotesError {
    NotesError::StorageUnavailable(format!("{}: {}", path.display(), err))
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.item_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(&path, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.ensure_dir()?;

        if self.quota_bytes > 0 {
            let used = self.used_by_others(key)?;
            ensure_within_quota(key, value.len() as u64, used, self.quota_bytes)?;
        }

        let target = self.item_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, value) {
            let _ = fs::remove_file(&tmp);
            return Err(unavailable(&tmp, e));
        }
        fs::rename(&tmp, &target).map_err(|e| unavailable(&target, e))?;

        tracing::debug!(key, bytes = value.len(), "wrote storage item");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(|e| unavailable(&self.root, e))?;
        for entry in entries {
            let path = entry.map_err(NotesError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(ITEM_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && validate_key(stem).is_ok()
            {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
