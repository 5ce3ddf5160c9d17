//! File-backed key-value store
//!
//! All entries live in one JSON object file (`store.json`) mapping keys to
//! string values. The file is read once and cached; every write rewrites the
//! whole file atomically (temp file + rename).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cc_core::ports::{KeyValueStorePort, StorageError};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    cache: Mutex<Option<Entries>>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Read the store file.
    ///
    /// A missing file is an empty store. A file that does not parse is moved
    /// aside to `<file>.corrupt` and the store starts empty.
    async fn read_from_disk(&self) -> Result<Entries, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file not found, starting empty");
                return Ok(Entries::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Entries>(&content) {
            Ok(entries) => Ok(entries),
            Err(parse_err) => {
                let backup = self.corrupt_backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %parse_err,
                    "store file is corrupt, moving it aside"
                );
                fs::rename(&self.path, &backup).await?;
                Ok(Entries::new())
            }
        }
    }

    async fn atomic_write(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    /// Apply `mutate` to a copy of the entries, persist it, then commit it to
    /// the cache. The cache never holds state the file does not.
    async fn update<F>(&self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_from_disk().await?);
        }
        let current = guard.get_or_insert_with(Entries::new);

        let mut next = current.clone();
        if !mutate(&mut next) {
            return Ok(());
        }
        self.atomic_write(&next).await?;
        *current = next;
        Ok(())
    }

    async fn snapshot(&self) -> Result<Entries, StorageError> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_from_disk().await?);
        }
        Ok(guard.get_or_insert_with(Entries::new).clone())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_from_disk().await?);
        }
        Ok(guard
            .get_or_insert_with(Entries::new)
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            if entries.get(key).map(String::as_str) == Some(value) {
                return false;
            }
            entries.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| entries.remove(key).is_some()).await
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.snapshot().await?.into_keys().collect())
    }
}
