//! # cc-core
//!
//! Core domain models and onboarding rules for CareConnect.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod app_dirs;
pub mod config;
pub mod event;
pub mod identity;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod tour;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use event::AppEvent;
pub use identity::UserId;
pub use ids::{EventName, SessionId, StepId};
pub use onboarding::{CompletionFlag, FlagSnapshot, UserProfile};
pub use tour::{AppView, StepCatalog, StepDefinition, TourError, TourMachine, TourPhase, TourState};
