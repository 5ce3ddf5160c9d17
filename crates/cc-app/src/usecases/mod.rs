//! Business logic use cases

pub mod completion_store;
pub mod identity;
pub mod onboarding;
pub mod session;
pub mod tour;

pub use completion_store::CompletionStore;
pub use identity::IdentityResolver;
pub use onboarding::{
    GetOnboardingStatus, OnboardingOrchestrator, OnboardingOutcome, OnboardingReport,
    OnboardingStatusDto, PhaseOutcome, ResetOnboarding,
};
pub use session::{LoginCoordinator, LoginOutcome};
pub use tour::{EventOutcome, TourSequencer, TourView};
