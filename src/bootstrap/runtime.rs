//! # Use Cases Accessor
//!
//! `AppRuntime` owns the long-lived, stateful use cases (the tour sequencer
//! keeps the active tour in memory, the orchestrator and login coordinator
//! keep their once-per-session sets). `UseCases` hands them out, and builds
//! the stateless ones on demand.
//!
//! ## Adding New Use Cases
//!
//! 1. Give the use case a `new()` constructor taking its ports
//! 2. Add a method to `UseCases` that calls `new()` with runtime state
//! 3. CLI commands call `runtime.usecases().your_use_case()`

use std::sync::Arc;

use anyhow::Context;
use cc_app::usecases::{
    CompletionStore, GetOnboardingStatus, IdentityResolver, LoginCoordinator,
    OnboardingOrchestrator, ResetOnboarding, TourSequencer,
};
use cc_app::{AppDeps, AppEventBus, OnboardingPolicy};
use cc_core::config::AppConfig;
use cc_core::tour::StepCatalog;
use tokio::task::JoinHandle;
use tracing::info;

/// Application runtime with dependencies.
pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    events: AppEventBus,
    policy: OnboardingPolicy,
    identity: Arc<IdentityResolver>,
    completion: Arc<CompletionStore>,
    sequencer: Arc<TourSequencer>,
    orchestrator: Arc<OnboardingOrchestrator>,
    login: Arc<LoginCoordinator>,
}

impl AppRuntime {
    /// Build the runtime from wired dependencies.
    ///
    /// `events` must be the bus the dependencies publish on.
    ///
    /// # Errors
    ///
    /// Fails when `[[tour.steps]]` repeats a step id or a trigger.
    pub fn new(deps: AppDeps, events: AppEventBus, config: &AppConfig) -> anyhow::Result<Self> {
        let policy = OnboardingPolicy::from_config(config);
        let catalog = match config.tour_steps.clone() {
            Some(steps) => StepCatalog::new(steps).context("Invalid [[tour.steps]] in config")?,
            None => StepCatalog::clinical_default(),
        };
        info!(steps = catalog.len(), "tour catalog loaded");

        let identity = Arc::new(IdentityResolver::new(deps.auth.clone(), deps.store.clone()));
        let completion = Arc::new(CompletionStore::new(deps.store.clone()));
        let sequencer = Arc::new(TourSequencer::new(
            catalog,
            completion.clone(),
            deps.presenter.clone(),
            deps.navigation.clone(),
            deps.notifier.clone(),
            deps.clock.clone(),
            events.clone(),
            policy.auto_advance_delay,
        ));
        let orchestrator = Arc::new(OnboardingOrchestrator::new(
            &deps,
            completion.clone(),
            sequencer.clone(),
            events.clone(),
            policy.clone(),
        ));
        let login = Arc::new(LoginCoordinator::new(
            identity.clone(),
            completion.clone(),
            orchestrator.clone(),
            sequencer.clone(),
            policy.clone(),
        ));

        Ok(Self {
            deps,
            events,
            policy,
            identity,
            completion,
            sequencer,
            orchestrator,
            login,
        })
    }

    pub fn events(&self) -> &AppEventBus {
        &self.events
    }

    pub fn policy(&self) -> &OnboardingPolicy {
        &self.policy
    }

    /// Get use cases accessor.
    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }

    /// Start the bus listeners: tour triggers and `LoginSucceeded`.
    ///
    /// Listeners run until the bus is dropped or their handles are aborted.
    pub async fn spawn_listeners(&self) -> Vec<JoinHandle<()>> {
        vec![
            self.sequencer
                .clone()
                .spawn_listener(self.identity.clone())
                .await,
            self.login.clone().spawn(&self.events).await,
        ]
    }
}

/// Use cases accessor bound to one runtime.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    pub fn identity(&self) -> Arc<IdentityResolver> {
        self.runtime.identity.clone()
    }

    pub fn completion_store(&self) -> Arc<CompletionStore> {
        self.runtime.completion.clone()
    }

    pub fn tour_sequencer(&self) -> Arc<TourSequencer> {
        self.runtime.sequencer.clone()
    }

    pub fn onboarding_orchestrator(&self) -> Arc<OnboardingOrchestrator> {
        self.runtime.orchestrator.clone()
    }

    pub fn login_coordinator(&self) -> Arc<LoginCoordinator> {
        self.runtime.login.clone()
    }

    pub fn get_onboarding_status(&self) -> GetOnboardingStatus {
        GetOnboardingStatus::new(
            self.runtime.completion.clone(),
            self.runtime.sequencer.catalog().clone(),
        )
    }

    pub fn reset_onboarding(&self) -> ResetOnboarding {
        ResetOnboarding::new(
            self.runtime.completion.clone(),
            self.runtime.sequencer.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_app::noop::*;
    use cc_core::tour::{AppView, StepDefinition};
    use cc_infra::{InMemoryKeyValueStore, SystemClock};

    fn noop_deps() -> AppDeps {
        AppDeps {
            store: Arc::new(InMemoryKeyValueStore::new()),
            auth: Arc::new(NoopAuthProvider),
            navigation: Arc::new(NoopNavigation),
            notifier: Arc::new(NoopNotifier),
            presenter: Arc::new(NoopTourPresenter),
            intro_media: Arc::new(NoopIntroMedia),
            profile_capture: Arc::new(NoopProfileCapture),
            agreement: Arc::new(NoopAgreement),
            clock: Arc::new(SystemClock),
        }
    }

    #[test]
    fn default_catalog_is_used_without_configured_steps() {
        let runtime =
            AppRuntime::new(noop_deps(), AppEventBus::new(), &AppConfig::empty()).unwrap();

        assert_eq!(runtime.usecases().tour_sequencer().catalog().len(), 9);
        assert_eq!(runtime.policy(), &OnboardingPolicy::default());
    }

    #[test]
    fn configured_steps_replace_default_catalog() {
        let mut config = AppConfig::empty();
        config.tour_steps = Some(vec![StepDefinition::new(
            "notes",
            "Notes",
            "Write a visit note.",
            "#notes",
            "note-saved",
            AppView::Notes,
        )]);

        let runtime = AppRuntime::new(noop_deps(), AppEventBus::new(), &config).unwrap();

        assert_eq!(runtime.usecases().tour_sequencer().catalog().len(), 1);
    }

    #[test]
    fn duplicate_configured_steps_are_rejected() {
        let step = StepDefinition::new("a", "A", "", "#a", "a-done", AppView::Dashboard);
        let mut config = AppConfig::empty();
        config.tour_steps = Some(vec![step.clone(), step]);

        let result = AppRuntime::new(noop_deps(), AppEventBus::new(), &config);

        assert!(format!("{:#}", result.err().unwrap()).contains("Invalid [[tour.steps]]"));
    }

    #[tokio::test]
    async fn listeners_subscribe_to_bus() {
        let runtime =
            AppRuntime::new(noop_deps(), AppEventBus::new(), &AppConfig::empty()).unwrap();

        let handles = runtime.spawn_listeners().await;

        assert_eq!(runtime.events().subscriber_count().await, 2);
        for handle in handles {
            handle.abort();
        }
    }
}
