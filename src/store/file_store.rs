//! File-backed key-value storage
//!
//! Each key maps to one JSON document inside the store directory, the
//! same shape the settings file uses upstream. Writes go through a temp
//! file and rename so a crash mid-write never leaves a half-written
//! document under the real key.

use crate::error::Result;
use crate::store::KeyValueStore;
use std::fs;
use std::path::PathBuf;

/// Key-value store persisting each key as `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::info!("File store opened at {:?}", root);
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed strings from config.rs, but sanitize anyway so a
        // stray separator can never escape the store directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    fn write(&self, key: &str, raw: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, raw)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Wrote key '{}' ({} bytes)", key, raw.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
