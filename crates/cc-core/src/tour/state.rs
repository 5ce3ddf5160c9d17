use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted guided-tour progress for one user.
///
/// Stored as a single JSON blob under `tour-{username}`. Field names are
/// camelCase because the front-end reads the same blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourState {
    pub current_step: usize,
    pub completed: bool,
    pub dismissed: bool,
    /// Epoch milliseconds.
    pub completed_at: Option<i64>,
    pub username: String,
    /// Epoch milliseconds; `None` until the tour is first started.
    pub started_at: Option<i64>,
}

/// Lifecycle position derived from a [`TourState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TourPhase {
    NotStarted,
    InProgress(usize),
    Completed,
}

impl TourState {
    pub fn is_started(&self) -> bool {
        self.started_at.is_some() || self.current_step > 0 || self.completed
    }

    pub fn phase(&self) -> TourPhase {
        if self.completed {
            TourPhase::Completed
        } else if self.is_started() {
            TourPhase::InProgress(self.current_step)
        } else {
            TourPhase::NotStarted
        }
    }

    pub fn completed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(DateTime::from_timestamp_millis)
    }
}
