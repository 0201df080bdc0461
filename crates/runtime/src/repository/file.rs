//! File-based PreferenceStore implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use super::error::{RepositoryError, Result};
use super::traits::PreferenceStore;

const FILE_NAME: &str = "preferences.json";

/// File-based implementation of PreferenceStore.
///
/// All keys live in one JSON object at `base_dir/preferences.json`. Writes go
/// to a temp file first and are moved into place with an atomic rename.
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;
        Ok(Self {
            path: base_dir.join(FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    /// Store under the platform config directory for this game.
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "erosion").ok_or(RepositoryError::NoHomeDirectory)?;
        Self::new(dirs.config_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, i64>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set_int(&self, key: &str, value: i64) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value);

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec_pretty(&values)?)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(key, value, path = %self.path.display(), "preference saved");
        Ok(())
    }
}
