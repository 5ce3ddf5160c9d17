//! User identity used to namespace every persisted onboarding key.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Sentinel identity used when neither the auth provider nor the session
/// store can name the current user.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Normalized user identity.
///
/// The wrapped value is trimmed and lowercased so that `JDoe` and `jdoe`
/// share the same storage namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Normalize a raw username. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// Normalize a raw username, falling back to the anonymous sentinel.
    pub fn new(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(Self::anonymous)
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_USER.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_USER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Suffix appended to per-user storage keys.
    pub fn storage_suffix(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
