//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create infra implementations (file store, clock)
//! - Create shell adapters (console UI, CLI form answers, env auth)
//! - Group them into `AppDeps`
//!
//! ## Prohibited
//!
//! - No business logic: nothing here decides whether a user is onboarded
//! - No configuration validation
//!
//! > **This is the only place allowed to depend on cc-infra + cc-app
//! > simultaneously.** The privilege is for assembly, not decision making.

use std::sync::Arc;

use cc_app::app_paths::AppPaths;
use cc_app::{AppDeps, AppEventBus};
use cc_core::ports::*;
use cc_infra::{FileKeyValueStore, SystemClock};
use tracing::debug;

use crate::adapters::{
    ArgsAgreement, ArgsProfileCapture, ConsoleIntroMedia, ConsoleNavigation, ConsoleNotifier,
    ConsolePresenter, ConsoleSink, EnvAuthProvider, FormAnswers,
};

/// Assemble the port implementations used by the CLI.
///
/// 1. File-backed key-value store at `paths.store_path`
/// 2. Console adapters writing to `sink`
/// 3. Form answers taken from the command line
pub fn wire_dependencies(
    paths: &AppPaths,
    events: &AppEventBus,
    sink: ConsoleSink,
    answers: FormAnswers,
) -> AppDeps {
    debug!(store = %paths.store_path.display(), "wiring dependencies");

    let store: Arc<dyn KeyValueStorePort> =
        Arc::new(FileKeyValueStore::new(paths.store_path.clone()));

    AppDeps {
        // Storage dependencies
        store,

        // Identity dependencies
        auth: Arc::new(EnvAuthProvider),

        // UI dependencies
        navigation: Arc::new(ConsoleNavigation::new(sink.clone())),
        notifier: Arc::new(ConsoleNotifier::new(sink.clone())),
        presenter: Arc::new(ConsolePresenter::new(sink.clone())),

        // Onboarding phase collaborators
        intro_media: Arc::new(ConsoleIntroMedia::new(sink, events.clone())),
        agreement: Arc::new(ArgsAgreement::new(answers.accept_terms)),
        profile_capture: Arc::new(ArgsProfileCapture::new(answers)),

        // System dependencies
        clock: Arc::new(SystemClock),
    }
}
