//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation
//!
//! Missing values stay `None`/empty. Defaults are applied once, by the
//! application layer's onboarding policy.

use std::path::PathBuf;

use anyhow::Context;

use crate::tour::StepDefinition;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Data directory override (empty when not configured)
    pub data_dir: PathBuf,

    /// Log level directive (empty when not configured)
    pub log_level: String,

    pub log_to_file: Option<bool>,

    /// Identities that never see onboarding
    pub admin_users: Option<Vec<String>>,

    /// Login roles that never see onboarding
    pub bypass_roles: Option<Vec<String>>,

    pub require_agreement: Option<bool>,

    pub controller_ready_timeout_ms: Option<u64>,

    pub media_complete_timeout_ms: Option<u64>,

    pub auto_advance_delay_ms: Option<u64>,

    /// Replacement tour step list
    pub tour_steps: Option<Vec<StepDefinition>>,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation or
    /// default value logic. Only a malformed `[[tour.steps]]` table is an
    /// error, because it cannot be mapped at all.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let onboarding = toml_value.get("onboarding");
        let millis = |key: &str| {
            onboarding
                .and_then(|o| o.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };

        let tour_steps = toml_value
            .get("tour")
            .and_then(|t| t.get("steps"))
            .map(|steps| steps.clone().try_into::<Vec<StepDefinition>>())
            .transpose()
            .context("Failed to map [[tour.steps]]")?;

        Ok(Self {
            data_dir: PathBuf::from(
                toml_value
                    .get("general")
                    .and_then(|g| g.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_level: toml_value
                .get("logging")
                .and_then(|l| l.get("level"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            log_to_file: toml_value
                .get("logging")
                .and_then(|l| l.get("to_file"))
                .and_then(|v| v.as_bool()),
            admin_users: string_list(onboarding.and_then(|o| o.get("admin_users"))),
            bypass_roles: string_list(onboarding.and_then(|o| o.get("bypass_roles"))),
            require_agreement: onboarding
                .and_then(|o| o.get("require_agreement"))
                .and_then(|v| v.as_bool()),
            controller_ready_timeout_ms: millis("controller_ready_timeout_ms"),
            media_complete_timeout_ms: millis("media_complete_timeout_ms"),
            auto_advance_delay_ms: millis("auto_advance_delay_ms"),
            tour_steps,
        })
    }

    /// Create empty AppConfig (all empty/unset values)
    pub fn empty() -> Self {
        Self::default()
    }
}

fn string_list(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value.and_then(|v| v.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect()
    })
}
