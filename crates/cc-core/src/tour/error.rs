use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("step index {index} is outside a tour of {total} steps")]
    StepOutOfRange { index: usize, total: usize },

    #[error("tour is already completed")]
    AlreadyCompleted,

    #[error("no tour is active")]
    NotActive,

    #[error("duplicate step id in catalog: {0}")]
    DuplicateStep(String),

    #[error("trigger {0} is bound to more than one step")]
    DuplicateTrigger(String),
}
