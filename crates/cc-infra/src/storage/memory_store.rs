use std::collections::HashMap;

use async_trait::async_trait;
use cc_core::ports::{KeyValueStorePort, StorageError};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    unavailable: bool,
}

/// Process-local key-value store.
///
/// An optional quota bounds the total size (key plus value bytes) of all
/// entries; a write that would exceed it fails with
/// [`StorageError::QuotaExceeded`] and leaves the store unchanged.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: Mutex<Inner>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                entries,
                unavailable: false,
            }),
            quota_bytes: None,
        }
    }

    /// Simulate a backend that rejects every operation.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().await.unavailable = unavailable;
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

fn check_available(inner: &Inner) -> Result<(), StorageError> {
    if inner.unavailable {
        return Err(StorageError::Unavailable("in-memory store disabled".to_string()));
    }
    Ok(())
}

#[async_trait]
impl KeyValueStorePort for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.lock().await;
        check_available(&inner)?;
        Ok(inner.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        check_available(&inner)?;

        if let Some(quota) = self.quota_bytes {
            let replaced = inner
                .entries
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let projected = Self::used_bytes(&inner.entries) - replaced + key.len() + value.len();
            if projected > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        check_available(&inner)?;
        inner.entries.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let inner = self.inner.lock().await;
        check_available(&inner)?;
        Ok(inner.entries.keys().cloned().collect())
    }
}
