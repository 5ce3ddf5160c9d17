//! Onboarding use cases
//!
//! The first-login flow itself, the admin reset, and the read-only status
//! query used by the shell.

pub mod orchestrator;
pub mod reset;
pub mod status;

pub use orchestrator::{OnboardingOrchestrator, OnboardingOutcome, OnboardingReport, PhaseOutcome};
pub use reset::ResetOnboarding;
pub use status::{GetOnboardingStatus, OnboardingStatusDto};
