use anyhow::Result;
use async_trait::async_trait;

use crate::tour::StepDefinition;

/// Renders the guided-tour overlay.
#[async_trait]
pub trait TourPresenterPort: Send + Sync {
    /// Show `step`, which is at position `index` of `total` steps.
    async fn show_step(&self, step: &StepDefinition, index: usize, total: usize) -> Result<()>;

    async fn hide(&self) -> Result<()>;
}
