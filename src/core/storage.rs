//! Persistence of the profile store

use crate::core::error::Result;
use crate::core::models::Profile;
use crate::core::profile_store::ProfileStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads and saves a profile store snapshot
pub trait ProfileStorage {
    /// Load the stored profiles; a store that was never saved loads as empty
    ///
    /// # Errors
    /// Returns `Io`, `Format`, or `DuplicateEntity` if the data repeats a profile name.
    fn load(&self) -> Result<ProfileStore>;

    /// Save the store's profiles
    ///
    /// # Errors
    /// Returns `Io` or `Format` if the snapshot cannot be written.
    fn save(&self, store: &ProfileStore) -> Result<()>;
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    profiles: &'a [Profile],
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// JSON file storage (pretty printed)
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStorage for JsonFileStorage {
    fn load(&self) -> Result<ProfileStore> {
        if !self.path.exists() {
            return Ok(ProfileStore::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(ProfileStore::new());
        }
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        ProfileStore::from_profiles(snapshot.profiles)
    }

    fn save(&self, store: &ProfileStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&SnapshotRef {
            profiles: store.profiles(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nope.json"));
        let store = storage.load().unwrap();
        assert!(store.profiles().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data").join("moddy.json");
        let storage = JsonFileStorage::new(&path);

        let mut store = ProfileStore::new();
        store
            .add_profile(Profile::new("Jane".into(), "Computer Science".into(), 2, None))
            .unwrap();
        storage.save(&store).unwrap();

        assert!(path.exists());
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.profiles(), store.profiles());
    }

    #[test]
    fn test_garbage_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("moddy.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(err, crate::core::error::ModelError::Format(_)));
    }
}
