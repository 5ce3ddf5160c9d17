use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ids::{EventName, StepId};

/// Top-level views (tabs) of the clinical workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppView {
    Dashboard,
    Clients,
    Programs,
    Map,
    Referrals,
    Calendar,
    Notes,
    Messages,
    Reports,
    Admin,
}

impl AppView {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppView::Dashboard => "dashboard",
            AppView::Clients => "clients",
            AppView::Programs => "programs",
            AppView::Map => "map",
            AppView::Referrals => "referrals",
            AppView::Calendar => "calendar",
            AppView::Notes => "notes",
            AppView::Messages => "messages",
            AppView::Reports => "reports",
            AppView::Admin => "admin",
        }
    }
}

impl Display for AppView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One guided-tour step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: String,
    pub text: String,
    /// Selector of the element the step highlights.
    pub target: String,
    /// Application event that satisfies the step.
    pub trigger: EventName,
    pub view: AppView,
}

impl StepDefinition {
    pub fn new(
        id: &str,
        title: &str,
        text: &str,
        target: &str,
        trigger: &str,
        view: AppView,
    ) -> Self {
        Self {
            id: StepId::from(id),
            title: title.to_string(),
            text: text.to_string(),
            target: target.to_string(),
            trigger: EventName::from(trigger),
            view,
        }
    }
}
