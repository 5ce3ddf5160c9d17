//! Guided-tour domain: persisted progress, step definitions and the pure
//! tour state machine.

mod catalog;
mod error;
pub mod machine;
mod state;
mod step;

pub use catalog::StepCatalog;
pub use error::TourError;
pub use machine::TourMachine;
pub use state::{TourPhase, TourState};
pub use step::{AppView, StepDefinition};
