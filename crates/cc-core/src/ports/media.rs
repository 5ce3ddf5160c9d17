//! Intro media controller port
//!
//! The controller plays the welcome animation. Completion is not returned
//! from `start`; the controller publishes `AppEvent::IntroMediaComplete`
//! on the event bus when playback ends.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait IntroMediaPort: Send + Sync {
    /// Resolves once the controller can play. `false` means it never will.
    ///
    /// Callers bound this wait with their own timeout.
    async fn wait_until_ready(&self) -> bool;

    async fn start(&self) -> Result<()>;
}
