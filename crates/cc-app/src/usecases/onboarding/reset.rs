use std::sync::Arc;

use cc_core::identity::UserId;
use tracing::info;

use crate::usecases::completion_store::CompletionStore;
use crate::usecases::tour::TourSequencer;

/// Admin reset: forget every onboarding fact recorded for a user.
///
/// This is the only way out of a completed tour.
pub struct ResetOnboarding {
    completion: Arc<CompletionStore>,
    sequencer: Arc<TourSequencer>,
}

impl ResetOnboarding {
    pub fn new(completion: Arc<CompletionStore>, sequencer: Arc<TourSequencer>) -> Self {
        Self {
            completion,
            sequencer,
        }
    }

    pub async fn execute(&self, user: &UserId) {
        if self.sequencer.active_user().await.as_ref() == Some(user) {
            self.sequencer.close().await;
        }
        self.completion.reset(user).await;
        info!(user = %user, "onboarding reset");
    }
}
