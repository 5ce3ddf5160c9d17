//! CareConnect onboarding orchestration layer
//!
//! This crate contains the onboarding use cases and the runtime pieces that
//! connect them: the completion store, the tour sequencer, the flow
//! orchestrator and the login coordinator.

pub mod app_paths;
pub mod deps;
pub mod event_bus;
pub mod noop;
pub mod policy;
pub mod usecases;

pub use deps::AppDeps;
pub use event_bus::AppEventBus;
pub use policy::OnboardingPolicy;
