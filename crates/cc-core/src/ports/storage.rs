//! Key-value storage port
//!
//! The onboarding subsystem persists everything as string values under
//! string keys, mirroring the browser storage the workspace front-end uses.
//! Only the completion store and the identity resolver talk to this port.

use async_trait::async_trait;

use super::errors::StorageError;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored, in no particular order.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;

    async fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Store {}

        #[async_trait]
        impl KeyValueStorePort for Store {
            async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
            async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
            async fn remove(&self, key: &str) -> Result<(), StorageError>;
            async fn keys(&self) -> Result<Vec<String>, StorageError>;
        }
    }

    #[tokio::test]
    async fn contains_is_derived_from_get() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .with(eq("tour-jdoe"))
            .times(1)
            .returning(|_| Ok(Some("{}".to_string())));
        store
            .expect_get()
            .with(eq("tour-bsmith"))
            .times(1)
            .returning(|_| Ok(None));

        assert!(store.contains("tour-jdoe").await.unwrap());
        assert!(!store.contains("tour-bsmith").await.unwrap());
    }

    #[tokio::test]
    async fn contains_propagates_storage_errors() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::Unavailable("disk detached".to_string())));

        let err = store.contains("anything").await.unwrap_err();
        assert_eq!(err, StorageError::Unavailable("disk detached".to_string()));
    }
}
