// Cache store for reading and writing cached repository lists.
// Handles JSON serialization and atomic filesystem writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{FolioError, Result};
use crate::github::Item;

use super::paths;

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let cached: CachedData<T> = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Write data to cache as JSON.
pub fn write_cached<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let cached = CachedData::new(data);
    let json = serde_json::to_string_pretty(&cached)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Key-value store of repository lists, one entry per user.
///
/// Entries never expire; each successful fetch overwrites the previous one.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Store rooted at an explicit directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform cache directory.
    pub fn from_env() -> Result<Self> {
        paths::cache_dir()
            .map(Self::at)
            .ok_or_else(|| FolioError::Other("Could not determine cache directory".to_string()))
    }

    /// Save a user's repository list.
    pub fn write_items(&self, username: &str, items: &[Item]) -> Result<()> {
        let path = paths::repos_path(&self.root, username);
        write_cached(&path, &items)?;
        tracing::debug!(key = %paths::repos_key(username), path = %path.display(), "cached repositories");
        Ok(())
    }

    /// Load a user's repository list, failing if no entry exists.
    pub fn read_items(&self, username: &str) -> Result<CachedData<Vec<Item>>> {
        read_cached(&paths::repos_path(&self.root, username))?
            .ok_or_else(|| FolioError::CacheMiss(username.to_string()))
    }
}
