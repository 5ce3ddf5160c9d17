use anyhow::Result;
use async_trait::async_trait;

use crate::identity::UserId;

#[async_trait]
pub trait AgreementPort: Send + Sync {
    /// Ask the user to accept the terms of use. Returns whether they accepted.
    async fn request_acceptance(&self, user: &UserId) -> Result<bool>;
}
