//! Onboarding policy: the single place where configuration defaults are
//! applied.

use std::time::Duration;

use cc_core::{identity::UserId, AppConfig};

pub const DEFAULT_ADMIN_USERS: [&str; 2] = ["admin", "master"];
pub const DEFAULT_BYPASS_ROLES: [&str; 1] = ["admin"];
pub const DEFAULT_CONTROLLER_READY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MEDIA_COMPLETE_TIMEOUT_MS: u64 = 180_000;
pub const DEFAULT_AUTO_ADVANCE_DELAY_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingPolicy {
    /// Lowercased usernames that never see onboarding.
    pub admin_users: Vec<String>,
    /// Lowercased login roles that never see onboarding.
    pub bypass_roles: Vec<String>,
    pub require_agreement: bool,
    pub controller_ready_timeout: Duration,
    pub media_complete_timeout: Duration,
    pub auto_advance_delay: Duration,
}

impl Default for OnboardingPolicy {
    fn default() -> Self {
        Self::from_config(&AppConfig::empty())
    }
}

impl OnboardingPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        let lowercase = |items: &[String]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect()
        };
        let defaults = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };

        Self {
            admin_users: config
                .admin_users
                .as_deref()
                .map(lowercase)
                .unwrap_or_else(|| defaults(&DEFAULT_ADMIN_USERS)),
            bypass_roles: config
                .bypass_roles
                .as_deref()
                .map(lowercase)
                .unwrap_or_else(|| defaults(&DEFAULT_BYPASS_ROLES)),
            require_agreement: config.require_agreement.unwrap_or(false),
            controller_ready_timeout: Duration::from_millis(
                config
                    .controller_ready_timeout_ms
                    .unwrap_or(DEFAULT_CONTROLLER_READY_TIMEOUT_MS),
            ),
            media_complete_timeout: Duration::from_millis(
                config
                    .media_complete_timeout_ms
                    .unwrap_or(DEFAULT_MEDIA_COMPLETE_TIMEOUT_MS),
            ),
            auto_advance_delay: Duration::from_millis(
                config
                    .auto_advance_delay_ms
                    .unwrap_or(DEFAULT_AUTO_ADVANCE_DELAY_MS),
            ),
        }
    }

    pub fn is_admin(&self, user: &UserId) -> bool {
        self.admin_users.iter().any(|admin| admin == user.as_str())
    }

    pub fn bypasses_role(&self, role: &str) -> bool {
        let role = role.trim().to_lowercase();
        self.bypass_roles.iter().any(|r| *r == role)
    }
}
