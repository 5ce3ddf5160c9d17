//! Onboarding flow orchestrator.
//!
//! Runs the first-login phases for one user strictly in order:
//! profile capture, user agreement (optional), intro media, dashboard
//! navigation, then the guided tour. Every wait is bounded and resolves;
//! no phase failure is surfaced to the caller.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use cc_core::{
    identity::UserId,
    onboarding::CompletionFlag,
    ports::{AgreementPort, ClockPort, IntroMediaPort, NavigationPort, ProfileCapturePort},
    tour::AppView,
    AppEvent,
};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::deps::AppDeps;
use crate::event_bus::AppEventBus;
use crate::policy::OnboardingPolicy;
use crate::usecases::completion_store::CompletionStore;
use crate::usecases::tour::{TourSequencer, TourView};

/// How one onboarding phase ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum PhaseOutcome {
    Completed,
    /// The phase's flag was already set.
    AlreadyDone,
    /// The user declined or skipped.
    Skipped,
    /// Turned off by configuration.
    Disabled,
    TimedOut,
    /// The collaborator never became available.
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingReport {
    pub user: String,
    pub profile: PhaseOutcome,
    pub agreement: PhaseOutcome,
    pub intro_media: PhaseOutcome,
    pub navigated: bool,
    pub tour: TourView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum OnboardingOutcome {
    /// Returning user; nothing ran.
    NotRequired,
    /// A run for the same user is already in flight.
    InProgress,
    Completed(OnboardingReport),
}

/// Removes the user from the in-flight set when the run ends or is dropped.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<UserId>>,
    user: UserId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.remove(&self.user);
    }
}

pub struct OnboardingOrchestrator {
    completion: Arc<CompletionStore>,
    sequencer: Arc<TourSequencer>,
    profile_capture: Arc<dyn ProfileCapturePort>,
    agreement: Arc<dyn AgreementPort>,
    intro_media: Arc<dyn IntroMediaPort>,
    navigation: Arc<dyn NavigationPort>,
    clock: Arc<dyn ClockPort>,
    events: AppEventBus,
    policy: OnboardingPolicy,
    in_flight: Mutex<HashSet<UserId>>,
}

impl OnboardingOrchestrator {
    pub fn new(
        deps: &AppDeps,
        completion: Arc<CompletionStore>,
        sequencer: Arc<TourSequencer>,
        events: AppEventBus,
        policy: OnboardingPolicy,
    ) -> Self {
        Self {
            completion,
            sequencer,
            profile_capture: deps.profile_capture.clone(),
            agreement: deps.agreement.clone(),
            intro_media: deps.intro_media.clone(),
            navigation: deps.navigation.clone(),
            clock: deps.clock.clone(),
            events,
            policy,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Whether `user` still has to go through onboarding.
    ///
    /// Admins and returning users answer `false` and get their profile and
    /// onboarding flags back-filled, so the answer is stable afterwards.
    pub async fn is_first_login(&self, user: &UserId) -> bool {
        if self.policy.is_admin(user) {
            debug!(user = %user, "admin identity, onboarding not required");
            self.completion.mark_returning(user).await;
            return false;
        }

        let flags = self.completion.flags(user).await;
        let tour = self.completion.get_tour_state(user).await;
        let returning = flags.profile_complete
            || flags.onboarding_complete
            || flags.agreement_accepted
            || tour.completed;
        if returning {
            if !(flags.profile_complete && flags.onboarding_complete) {
                info!(user = %user, ?flags, tour_completed = tour.completed, "returning user, back-filling flags");
            }
            self.completion.mark_returning(user).await;
            return false;
        }
        true
    }

    pub async fn run_onboarding(&self, user: &UserId) -> OnboardingOutcome {
        let _guard = {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !in_flight.insert(user.clone()) {
                info!(user = %user, "onboarding already running for user");
                return OnboardingOutcome::InProgress;
            }
            InFlightGuard {
                in_flight: &self.in_flight,
                user: user.clone(),
            }
        };

        let span = info_span!("usecase.onboarding.run", user = %user);
        self.run_phases(user).instrument(span).await
    }

    async fn run_phases(&self, user: &UserId) -> OnboardingOutcome {
        if !self.is_first_login(user).await {
            debug!("onboarding not required");
            return OnboardingOutcome::NotRequired;
        }

        let profile = self.profile_phase(user).await;
        let agreement = self.agreement_phase(user).await;
        let intro_media = self.intro_media_phase(user).await;

        let navigated = match self.navigation.navigate_to(AppView::Dashboard).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to navigate to dashboard");
                false
            }
        };

        let tour = self.sequencer.start(user).await;

        info!(
            ?profile,
            ?agreement,
            ?intro_media,
            navigated,
            tour_step = tour.cursor,
            "onboarding phases finished"
        );
        OnboardingOutcome::Completed(OnboardingReport {
            user: user.to_string(),
            profile,
            agreement,
            intro_media,
            navigated,
            tour,
        })
    }

    async fn profile_phase(&self, user: &UserId) -> PhaseOutcome {
        if self
            .completion
            .get_flag(user, CompletionFlag::ProfileComplete)
            .await
        {
            return PhaseOutcome::AlreadyDone;
        }

        match self.profile_capture.capture(user).await {
            Ok(Some(mut profile)) => {
                if profile.captured_at.is_none() {
                    profile.captured_at = Some(self.clock.now_ms());
                }
                self.completion.set_profile(user, &profile).await;
                self.completion
                    .set_flag(user, CompletionFlag::ProfileComplete, true)
                    .await;
                PhaseOutcome::Completed
            }
            Ok(None) => {
                info!("profile capture skipped");
                PhaseOutcome::Skipped
            }
            Err(err) => {
                warn!(error = %err, "profile capture failed");
                PhaseOutcome::Failed(err.to_string())
            }
        }
    }

    async fn agreement_phase(&self, user: &UserId) -> PhaseOutcome {
        if !self.policy.require_agreement {
            return PhaseOutcome::Disabled;
        }
        if self
            .completion
            .get_flag(user, CompletionFlag::AgreementAccepted)
            .await
        {
            return PhaseOutcome::AlreadyDone;
        }

        match self.agreement.request_acceptance(user).await {
            Ok(true) => {
                self.completion
                    .set_flag(user, CompletionFlag::AgreementAccepted, true)
                    .await;
                PhaseOutcome::Completed
            }
            Ok(false) => {
                info!("user agreement not accepted");
                PhaseOutcome::Skipped
            }
            Err(err) => {
                warn!(error = %err, "user agreement prompt failed");
                PhaseOutcome::Failed(err.to_string())
            }
        }
    }

    /// The onboarding flag is set whatever happens to the media, so a broken
    /// controller never traps a user in the flow.
    async fn intro_media_phase(&self, user: &UserId) -> PhaseOutcome {
        if self
            .completion
            .get_flag(user, CompletionFlag::OnboardingComplete)
            .await
        {
            return PhaseOutcome::AlreadyDone;
        }

        let outcome = self.play_intro_media().await;
        self.completion
            .set_flag(user, CompletionFlag::OnboardingComplete, true)
            .await;
        outcome
    }

    async fn play_intro_media(&self) -> PhaseOutcome {
        // Subscribe before starting so a fast completion is not missed.
        let mut events = self.events.subscribe().await;

        let ready_timeout = self.policy.controller_ready_timeout;
        match timeout(ready_timeout, self.intro_media.wait_until_ready()).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("intro media controller unavailable, skipping media");
                return PhaseOutcome::Unavailable;
            }
            Err(_) => {
                warn!(
                    timeout_ms = ready_timeout.as_millis() as u64,
                    "intro media controller not ready in time, skipping media"
                );
                return PhaseOutcome::Unavailable;
            }
        }

        if let Err(err) = self.intro_media.start().await {
            warn!(error = %err, "failed to start intro media");
            return PhaseOutcome::Failed(err.to_string());
        }

        let complete_timeout = self.policy.media_complete_timeout;
        let waited = timeout(complete_timeout, async {
            while let Some(event) = events.recv().await {
                if let AppEvent::IntroMediaComplete { timed_out } = event {
                    return Some(timed_out);
                }
            }
            None
        })
        .await;

        match waited {
            Ok(Some(false)) => PhaseOutcome::Completed,
            Ok(Some(true)) => PhaseOutcome::TimedOut,
            Ok(None) => PhaseOutcome::Unavailable,
            Err(_) => {
                warn!(
                    timeout_ms = complete_timeout.as_millis() as u64,
                    "intro media did not complete in time"
                );
                self.events
                    .publish(AppEvent::IntroMediaComplete { timed_out: true })
                    .await;
                PhaseOutcome::TimedOut
            }
        }
    }
}
