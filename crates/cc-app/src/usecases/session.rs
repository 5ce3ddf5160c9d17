//! Login coordinator.
//!
//! Turns a successful login into the right onboarding action, once per
//! identity per process session.

use std::collections::HashSet;
use std::sync::Arc;

use cc_core::{identity::UserId, AppEvent, SessionId};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};

use crate::event_bus::AppEventBus;
use crate::policy::OnboardingPolicy;
use crate::usecases::completion_store::CompletionStore;
use crate::usecases::identity::IdentityResolver;
use crate::usecases::onboarding::{OnboardingOrchestrator, OnboardingOutcome};
use crate::usecases::tour::{TourSequencer, TourView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum LoginOutcome {
    /// This identity was already handled in the current session.
    AlreadyHandled,
    /// The login role skips onboarding entirely.
    Bypassed,
    Onboarded { result: OnboardingOutcome },
    Resumed { tour: TourView },
    /// Returning user with nothing left to show.
    Idle,
}

pub struct LoginCoordinator {
    identity: Arc<IdentityResolver>,
    completion: Arc<CompletionStore>,
    orchestrator: Arc<OnboardingOrchestrator>,
    sequencer: Arc<TourSequencer>,
    policy: OnboardingPolicy,
    handled: Mutex<HashSet<UserId>>,
}

impl LoginCoordinator {
    pub fn new(
        identity: Arc<IdentityResolver>,
        completion: Arc<CompletionStore>,
        orchestrator: Arc<OnboardingOrchestrator>,
        sequencer: Arc<TourSequencer>,
        policy: OnboardingPolicy,
    ) -> Self {
        Self {
            identity,
            completion,
            orchestrator,
            sequencer,
            policy,
            handled: Mutex::new(HashSet::new()),
        }
    }

    pub async fn on_login(&self, username: &str, role: Option<&str>) -> LoginOutcome {
        let user = UserId::new(username);
        let session = SessionId::new();
        let span = info_span!(
            "usecase.login.on_login",
            user = %user,
            role = ?role,
            session = %session
        );
        async {
            self.identity.remember_session(&user).await;

            if !self.handled.lock().await.insert(user.clone()) {
                debug!("identity already handled this session");
                return LoginOutcome::AlreadyHandled;
            }

            if role.is_some_and(|role| self.policy.bypasses_role(role)) {
                info!("login role bypasses onboarding");
                self.completion.mark_returning(&user).await;
                return LoginOutcome::Bypassed;
            }

            if self.orchestrator.is_first_login(&user).await {
                let result = self.orchestrator.run_onboarding(&user).await;
                return LoginOutcome::Onboarded { result };
            }

            match self.sequencer.resume(&user).await {
                Some(tour) => {
                    info!(step = tour.cursor, "resumed unfinished tour");
                    LoginOutcome::Resumed { tour }
                }
                None => LoginOutcome::Idle,
            }
        }
        .instrument(span)
        .await
    }

    /// Forget the session user and close any visible tour.
    pub async fn on_logout(&self) {
        let user = self.identity.current_user_id().await;
        self.handled.lock().await.remove(&user);
        self.identity.clear_session().await;
        self.sequencer.close().await;
        info!(user = %user, "logged out");
    }

    /// Handle every `LoginSucceeded` published on the bus.
    pub async fn spawn(self: Arc<Self>, events: &AppEventBus) -> JoinHandle<()> {
        let mut rx = events.subscribe().await;
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let AppEvent::LoginSucceeded { username, role } = event {
                    let outcome = self.on_login(&username, role.as_deref()).await;
                    debug!(?outcome, "login handled");
                }
            }
        })
    }
}
