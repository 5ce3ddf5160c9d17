//! # Application Dependencies
//!
//! This module defines the dependency grouping for runtime construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - No hidden logic
//! - Just parameter grouping

use std::sync::Arc;

use cc_core::ports::*;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required. Callers that lack a collaborator pass the
/// matching null object from [`crate::noop`].
pub struct AppDeps {
    // Storage dependencies
    pub store: Arc<dyn KeyValueStorePort>,

    // Identity dependencies
    pub auth: Arc<dyn AuthProviderPort>,

    // UI dependencies
    pub navigation: Arc<dyn NavigationPort>,
    pub notifier: Arc<dyn NotificationPort>,
    pub presenter: Arc<dyn TourPresenterPort>,

    // Onboarding phase collaborators
    pub intro_media: Arc<dyn IntroMediaPort>,
    pub profile_capture: Arc<dyn ProfileCapturePort>,
    pub agreement: Arc<dyn AgreementPort>,

    // System dependencies
    pub clock: Arc<dyn ClockPort>,
}
