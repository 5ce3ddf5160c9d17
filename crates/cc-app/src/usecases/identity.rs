use std::sync::Arc;

use cc_core::{
    identity::UserId,
    onboarding::keys::SESSION_USER_KEY,
    ports::{AuthProviderPort, KeyValueStorePort},
};
use tracing::{debug, warn};

/// Resolves the identity every onboarding key is namespaced with.
///
/// Order: external auth provider, then the stored session value, then the
/// anonymous sentinel. Never fails.
pub struct IdentityResolver {
    auth: Arc<dyn AuthProviderPort>,
    store: Arc<dyn KeyValueStorePort>,
}

impl IdentityResolver {
    pub fn new(auth: Arc<dyn AuthProviderPort>, store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { auth, store }
    }

    pub async fn current_user_id(&self) -> UserId {
        if let Some(user) = self.auth.current_user().as_deref().and_then(UserId::parse) {
            return user;
        }

        match self.store.get(SESSION_USER_KEY).await {
            Ok(Some(raw)) => {
                if let Some(user) = UserId::parse(&raw) {
                    return user;
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "failed to read session user, falling back to anonymous");
            }
        }

        debug!("no authenticated or session user, using anonymous identity");
        UserId::anonymous()
    }

    pub async fn remember_session(&self, user: &UserId) {
        if let Err(err) = self.store.set(SESSION_USER_KEY, user.as_str()).await {
            warn!(user = %user, error = %err, "failed to store session user");
        }
    }

    pub async fn clear_session(&self) {
        if let Err(err) = self.store.remove(SESSION_USER_KEY).await {
            warn!(error = %err, "failed to clear session user");
        }
    }
}
