use std::sync::Arc;

use cc_core::{
    identity::UserId,
    ids::StepId,
    onboarding::{FlagSnapshot, UserProfile},
    tour::{StepCatalog, TourPhase, TourState},
};
use serde::Serialize;

use crate::usecases::completion_store::CompletionStore;

/// Data transfer object for a user's onboarding status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatusDto {
    pub user: String,
    pub flags: FlagSnapshot,
    pub profile: Option<UserProfile>,
    pub tour: TourState,
    pub phase: TourPhase,
    pub total_steps: usize,
    /// Step the user would see next, if the tour is unfinished.
    pub next_step: Option<StepId>,
}

/// Read-only view of everything recorded for a user.
pub struct GetOnboardingStatus {
    completion: Arc<CompletionStore>,
    catalog: StepCatalog,
}

impl GetOnboardingStatus {
    pub fn new(completion: Arc<CompletionStore>, catalog: StepCatalog) -> Self {
        Self {
            completion,
            catalog,
        }
    }

    pub async fn execute(&self, user: &UserId) -> OnboardingStatusDto {
        let flags = self.completion.flags(user).await;
        let profile = self.completion.get_profile(user).await;
        let tour = self.completion.get_tour_state(user).await;
        let next_step = if tour.completed {
            None
        } else {
            self.catalog.get(tour.current_step).map(|step| step.id.clone())
        };

        OnboardingStatusDto {
            user: user.to_string(),
            flags,
            profile,
            phase: tour.phase(),
            total_steps: self.catalog.len(),
            next_step,
            tour,
        }
    }
}
