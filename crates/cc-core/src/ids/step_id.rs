use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of a tour step, unique within a step catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

/// Name of an application event that can satisfy a tour step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl_id!(StepId, EventName);
