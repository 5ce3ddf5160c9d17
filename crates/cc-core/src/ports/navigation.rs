use anyhow::Result;

use crate::tour::AppView;

#[async_trait::async_trait]
pub trait NavigationPort: Send + Sync {
    /// Switch the workspace to the given top-level view.
    async fn navigate_to(&self, view: AppView) -> Result<()>;
}
