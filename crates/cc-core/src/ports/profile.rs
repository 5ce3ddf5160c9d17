use anyhow::Result;
use async_trait::async_trait;

use crate::identity::UserId;
use crate::onboarding::UserProfile;

#[async_trait]
pub trait ProfileCapturePort: Send + Sync {
    /// Collect the user's profile. `Ok(None)` when the user skipped the form.
    async fn capture(&self, user: &UserId) -> Result<Option<UserProfile>>;
}
