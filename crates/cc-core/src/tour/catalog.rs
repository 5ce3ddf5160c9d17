use std::collections::HashSet;
use std::sync::Arc;

use crate::ids::EventName;
use crate::tour::{AppView, StepDefinition, TourError};

/// Ordered, immutable list of tour steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Arc<[StepDefinition]>,
}

impl StepCatalog {
    /// Build a catalog, rejecting duplicate step ids and triggers.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, TourError> {
        let mut ids = HashSet::new();
        let mut triggers = HashSet::new();
        for step in &steps {
            if !ids.insert(step.id.clone()) {
                return Err(TourError::DuplicateStep(step.id.to_string()));
            }
            if !triggers.insert(step.trigger.clone()) {
                return Err(TourError::DuplicateTrigger(step.trigger.to_string()));
            }
        }
        Ok(Self {
            steps: steps.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    pub fn index_of_trigger(&self, trigger: &EventName) -> Option<usize> {
        self.steps.iter().position(|step| &step.trigger == trigger)
    }

    /// The nine-step tour shipped with the clinical workspace.
    pub fn clinical_default() -> Self {
        let steps = vec![
            StepDefinition::new(
                "dashboard-overview",
                "Your dashboard",
                "Today's caseload, alerts and upcoming appointments live here.",
                "#dashboard-summary",
                "dashboard-viewed",
                AppView::Dashboard,
            ),
            StepDefinition::new(
                "add-client",
                "Add a client",
                "Register a new client to start tracking their care plan.",
                "#add-client-btn",
                "client-added",
                AppView::Clients,
            ),
            StepDefinition::new(
                "search-programs",
                "Find programs",
                "Search community programs by need, eligibility or distance.",
                "#program-search",
                "program-searched",
                AppView::Programs,
            ),
            StepDefinition::new(
                "map-view",
                "Explore the map",
                "See programs near your client's address.",
                "#map-container",
                "map-opened",
                AppView::Map,
            ),
            StepDefinition::new(
                "create-referral",
                "Make a referral",
                "Send a client to a program and follow its status.",
                "#new-referral-btn",
                "referral-created",
                AppView::Referrals,
            ),
            StepDefinition::new(
                "schedule-appointment",
                "Schedule an appointment",
                "Book follow-ups and see them on the shared calendar.",
                "#calendar-add",
                "appointment-scheduled",
                AppView::Calendar,
            ),
            StepDefinition::new(
                "case-notes",
                "Write case notes",
                "Document each encounter in the client's record.",
                "#case-note-editor",
                "case-note-saved",
                AppView::Notes,
            ),
            StepDefinition::new(
                "messages",
                "Message your team",
                "Coordinate securely with colleagues and partner agencies.",
                "#compose-message",
                "message-sent",
                AppView::Messages,
            ),
            StepDefinition::new(
                "reports",
                "Run a report",
                "Export outcomes for your program and funders.",
                "#run-report-btn",
                "report-generated",
                AppView::Reports,
            ),
        ];

        Self {
            steps: steps.into(),
        }
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::clinical_default()
    }
}
