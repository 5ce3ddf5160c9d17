//! Guided-tour state machine.
//!
//! Pure transition functions over [`TourState`]; persistence, presentation
//! and event emission belong to the application layer.
//!
//! `NotStarted -> InProgress(0) -> ... -> InProgress(n-1) -> Completed`.
//! `Completed` is absorbing: every transition returns it unchanged.

#[cfg(feature = "tracing")]
use tracing::warn;

use crate::identity::UserId;
use crate::tour::{TourError, TourState};

pub struct TourMachine;

impl TourMachine {
    pub fn is_complete(state: &TourState, total: usize) -> bool {
        state.completed && state.current_step >= total
    }

    /// Begin or resume the tour for `user`. Clears `dismissed`.
    pub fn start(state: TourState, user: &UserId, now_ms: i64) -> TourState {
        if state.completed {
            return state;
        }
        TourState {
            username: user.to_string(),
            dismissed: false,
            started_at: state.started_at.or(Some(now_ms)),
            ..state
        }
    }

    /// Advance one step, completing the tour from the last step.
    pub fn next(state: TourState, total: usize, now_ms: i64) -> TourState {
        if state.completed {
            return state;
        }
        if state.current_step + 1 >= total {
            return Self::complete(state, total, now_ms);
        }
        TourState {
            current_step: state.current_step + 1,
            ..state
        }
    }

    /// Retreat one step, floored at zero.
    pub fn prev(state: TourState) -> TourState {
        if state.completed || state.current_step == 0 {
            return state;
        }
        TourState {
            current_step: state.current_step - 1,
            ..state
        }
    }

    /// Set the cursor directly. Used when resuming from persisted state.
    pub fn jump_to(state: TourState, index: usize, total: usize) -> Result<TourState, TourError> {
        if state.completed {
            return Err(TourError::AlreadyCompleted);
        }
        if index >= total {
            return Err(TourError::StepOutOfRange { index, total });
        }
        Ok(TourState {
            current_step: index,
            ..state
        })
    }

    /// Record that the step at `index` was satisfied outside the guided tour.
    ///
    /// Returns `None` when nothing changes: the tour is completed, the index
    /// is unknown, or the step is already behind the persisted cursor.
    pub fn record_progress(
        state: TourState,
        index: usize,
        total: usize,
        now_ms: i64,
    ) -> Option<TourState> {
        if state.completed || index >= total || index < state.current_step {
            return None;
        }
        let advanced = index + 1;
        let state = TourState {
            started_at: state.started_at.or(Some(now_ms)),
            ..state
        };
        if advanced >= total {
            return Some(Self::complete(state, total, now_ms));
        }
        Some(TourState {
            current_step: advanced,
            ..state
        })
    }

    pub fn dismiss(state: TourState) -> TourState {
        if state.completed {
            return state;
        }
        TourState {
            dismissed: true,
            ..state
        }
    }

    /// Repair states that break `completed => current_step >= total`, and
    /// finish tours whose cursor already ran past the end.
    pub fn normalize(state: TourState, total: usize, now_ms: i64) -> TourState {
        if state.completed && state.current_step < total {
            #[cfg(feature = "tracing")]
            warn!(
                current_step = state.current_step,
                total, "completed tour with short cursor; repairing"
            );
            return TourState {
                current_step: total,
                ..state
            };
        }
        if !state.completed && state.current_step >= total && state.is_started() {
            return Self::complete(state, total, now_ms);
        }
        state
    }

    fn complete(state: TourState, total: usize, now_ms: i64) -> TourState {
        TourState {
            current_step: total,
            completed: true,
            completed_at: Some(now_ms),
            ..state
        }
    }
}
