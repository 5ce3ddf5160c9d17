//! Completion store
//!
//! Typed access to the onboarding keys of the key-value store. Every storage
//! failure is logged and degraded: reads fall back to "not completed" or the
//! zero-value tour state, writes are dropped. Nothing propagates to callers.

use std::sync::Arc;

use cc_core::{
    identity::UserId,
    onboarding::{
        decode_flag, encode_flag,
        keys::{flag_key, global_flag_key, is_user_scoped_key, profile_key, tour_key, user_keys},
        CompletionFlag, FlagSnapshot, UserProfile,
    },
    ports::KeyValueStorePort,
    tour::TourState,
};
use tracing::{debug, info, warn};

pub struct CompletionStore {
    store: Arc<dyn KeyValueStorePort>,
}

impl CompletionStore {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "onboarding storage read failed");
                None
            }
        }
    }

    async fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value).await {
            warn!(key, error = %err, "onboarding storage write failed");
        }
    }

    /// Per-user key, else the un-suffixed legacy key.
    pub async fn get_flag(&self, user: &UserId, flag: CompletionFlag) -> bool {
        if decode_flag(self.read(&flag_key(flag, user)).await.as_deref()) {
            return true;
        }
        decode_flag(self.read(global_flag_key(flag)).await.as_deref())
    }

    /// Writes the per-user key only; the global key is never written.
    pub async fn set_flag(&self, user: &UserId, flag: CompletionFlag, value: bool) {
        debug!(user = %user, flag = %flag, value, "set completion flag");
        self.write(&flag_key(flag, user), encode_flag(value)).await;
    }

    pub async fn flags(&self, user: &UserId) -> FlagSnapshot {
        let mut snapshot = FlagSnapshot::default();
        for flag in CompletionFlag::ALL {
            snapshot.set(flag, self.get_flag(user, flag).await);
        }
        snapshot
    }

    /// Back-fill the flags that mark `user` as a returning user.
    pub async fn mark_returning(&self, user: &UserId) {
        self.set_flag(user, CompletionFlag::ProfileComplete, true)
            .await;
        self.set_flag(user, CompletionFlag::OnboardingComplete, true)
            .await;
    }

    /// Zero-value state on absence or unparseable JSON.
    pub async fn get_tour_state(&self, user: &UserId) -> TourState {
        let key = tour_key(user);
        let Some(raw) = self.read(&key).await else {
            return TourState::default();
        };
        match serde_json::from_str::<TourState>(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(key = %key, error = %err, "stored tour state is not valid JSON, using defaults");
                TourState::default()
            }
        }
    }

    pub async fn set_tour_state(&self, user: &UserId, state: &TourState) {
        match serde_json::to_string(state) {
            Ok(json) => self.write(&tour_key(user), &json).await,
            Err(err) => warn!(user = %user, error = %err, "failed to encode tour state"),
        }
    }

    pub async fn get_profile(&self, user: &UserId) -> Option<UserProfile> {
        let key = profile_key(user);
        let raw = self.read(&key).await?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(key = %key, error = %err, "stored profile is not valid JSON, ignoring");
                None
            }
        }
    }

    pub async fn set_profile(&self, user: &UserId, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(json) => self.write(&profile_key(user), &json).await,
            Err(err) => warn!(user = %user, error = %err, "failed to encode profile"),
        }
    }

    /// Admin reset: delete every per-user key of `user`.
    ///
    /// The legacy global flags are deleted too once no per-user onboarding
    /// keys remain for anyone, so a fully reset store starts from scratch.
    pub async fn reset(&self, user: &UserId) {
        for key in user_keys(user) {
            if let Err(err) = self.store.remove(&key).await {
                warn!(key = %key, error = %err, "failed to remove onboarding key");
            }
        }

        let remaining = match self.store.keys().await {
            Ok(keys) => keys,
            Err(err) => {
                warn!(error = %err, "failed to list keys, keeping global flags");
                return;
            }
        };
        if remaining.iter().any(|key| is_user_scoped_key(key)) {
            info!(user = %user, "onboarding reset for user");
            return;
        }

        for flag in CompletionFlag::ALL {
            if let Err(err) = self.store.remove(global_flag_key(flag)).await {
                warn!(flag = %flag, error = %err, "failed to remove global flag");
            }
        }
        info!(user = %user, "onboarding reset for user, global flags cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::ports::StorageError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl MapStore {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self {
                entries: Mutex::new(
                    entries
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                fail_writes: false,
            }
        }

        fn value(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait::async_trait]
    impl KeyValueStorePort for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn keys(&self) -> Result<Vec<String>, StorageError> {
            Ok(self.entries.lock().unwrap().keys().cloned().collect())
        }
    }

    #[tokio::test]
    async fn per_user_flag_is_read_back() {
        let store = Arc::new(MapStore::default());
        let completion = CompletionStore::new(store.clone());
        let user = UserId::from("jdoe");

        completion
            .set_flag(&user, CompletionFlag::ProfileComplete, true)
            .await;

        assert!(completion.get_flag(&user, CompletionFlag::ProfileComplete).await);
        assert_eq!(store.value("profile-complete-jdoe").as_deref(), Some("true"));
        assert_eq!(store.value("profile-complete"), None);
    }

    #[tokio::test]
    async fn global_flag_is_a_fallback() {
        let store = Arc::new(MapStore::with(&[("onboarding-complete", "true")]));
        let completion = CompletionStore::new(store);

        let flags = completion.flags(&UserId::from("bsmith")).await;

        assert!(flags.onboarding_complete);
        assert!(!flags.profile_complete);
    }

    #[tokio::test]
    async fn non_true_strings_read_as_false() {
        let store = Arc::new(MapStore::with(&[
            ("profile-complete-jdoe", "TRUE?"),
            ("agreement-accepted-jdoe", "1"),
        ]));
        let completion = CompletionStore::new(store);
        let user = UserId::from("jdoe");

        assert!(!completion.get_flag(&user, CompletionFlag::ProfileComplete).await);
        assert!(!completion.get_flag(&user, CompletionFlag::AgreementAccepted).await);
    }

    #[tokio::test]
    async fn corrupt_tour_state_reads_as_zero_value() {
        let store = Arc::new(MapStore::with(&[("tour-jdoe", "not json")]));
        let completion = CompletionStore::new(store);

        let state = completion.get_tour_state(&UserId::from("jdoe")).await;

        assert_eq!(state, TourState::default());
    }

    #[tokio::test]
    async fn tour_state_round_trips_with_camel_case_blob() {
        let store = Arc::new(MapStore::default());
        let completion = CompletionStore::new(store.clone());
        let user = UserId::from("jdoe");
        let state = TourState {
            current_step: 4,
            username: "jdoe".to_string(),
            started_at: Some(10),
            ..Default::default()
        };

        completion.set_tour_state(&user, &state).await;

        let raw = store.value("tour-jdoe").unwrap();
        assert!(raw.contains("\"currentStep\":4"));
        assert_eq!(completion.get_tour_state(&user).await, state);
    }

    #[tokio::test]
    async fn write_failures_are_swallowed() {
        let store = Arc::new(MapStore {
            fail_writes: true,
            ..Default::default()
        });
        let completion = CompletionStore::new(store);
        let user = UserId::from("jdoe");

        completion.mark_returning(&user).await;

        assert!(!completion.get_flag(&user, CompletionFlag::OnboardingComplete).await);
    }

    #[tokio::test]
    async fn reset_keeps_global_flags_while_other_users_remain() {
        let store = Arc::new(MapStore::with(&[
            ("onboarding-complete", "true"),
            ("onboarding-complete-jdoe", "true"),
            ("tour-jdoe", "{}"),
            ("user-profile-jdoe", "{}"),
            ("profile-complete-bsmith", "true"),
            ("session-user", "jdoe"),
        ]));
        let completion = CompletionStore::new(store.clone());

        completion.reset(&UserId::from("jdoe")).await;

        assert_eq!(store.value("onboarding-complete-jdoe"), None);
        assert_eq!(store.value("tour-jdoe"), None);
        assert_eq!(store.value("user-profile-jdoe"), None);
        assert_eq!(store.value("onboarding-complete").as_deref(), Some("true"));
        assert_eq!(store.value("profile-complete-bsmith").as_deref(), Some("true"));
        assert_eq!(store.value("session-user").as_deref(), Some("jdoe"));
    }

    #[tokio::test]
    async fn reset_of_last_user_clears_global_flags() {
        let store = Arc::new(MapStore::with(&[
            ("onboarding-complete", "true"),
            ("profile-complete-jdoe", "true"),
        ]));
        let completion = CompletionStore::new(store.clone());

        completion.reset(&UserId::from("jdoe")).await;

        assert_eq!(store.value("onboarding-complete"), None);
        assert!(!completion.flags(&UserId::from("jdoe")).await.onboarding_complete);
    }

    #[tokio::test]
    async fn profile_is_stored_as_json() {
        let store = Arc::new(MapStore::default());
        let completion = CompletionStore::new(store);
        let user = UserId::from("jdoe");
        let profile = UserProfile::new("Jane Doe");

        completion.set_profile(&user, &profile).await;

        assert_eq!(completion.get_profile(&user).await, Some(profile));
    }
}
