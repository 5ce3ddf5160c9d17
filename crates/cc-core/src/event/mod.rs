//! Application events carried by the in-process event bus.

use serde::{Deserialize, Serialize};

use crate::ids::{EventName, StepId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// Authentication succeeded for `username`.
    LoginSucceeded {
        username: String,
        role: Option<String>,
    },
    /// The user performed a feature action somewhere in the workspace.
    UiAction { name: EventName },
    /// The intro media sequence finished, or was abandoned after a timeout.
    IntroMediaComplete { timed_out: bool },
    /// A guided-tour step was finished.
    TourStepCompleted {
        username: String,
        step_id: StepId,
        index: usize,
    },
    /// The guided tour reached its final state.
    TourCompleted { username: String },
}

impl AppEvent {
    pub fn ui_action(name: &str) -> Self {
        AppEvent::UiAction {
            name: EventName::from(name),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::LoginSucceeded { .. } => "login_succeeded",
            AppEvent::UiAction { .. } => "ui_action",
            AppEvent::IntroMediaComplete { .. } => "intro_media_complete",
            AppEvent::TourStepCompleted { .. } => "tour_step_completed",
            AppEvent::TourCompleted { .. } => "tour_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_event_serializes_with_type_tag() {
        let event = AppEvent::LoginSucceeded {
            username: "jdoe".to_string(),
            role: Some("case-worker".to_string()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "login_succeeded");
        assert_eq!(json["username"], "jdoe");
        assert_eq!(event.kind(), "login_succeeded");
    }

    #[test]
    fn ui_action_helper_wraps_name() {
        let event = AppEvent::ui_action("client-added");
        assert_eq!(
            event,
            AppEvent::UiAction {
                name: EventName::from("client-added")
            }
        );
    }
}
