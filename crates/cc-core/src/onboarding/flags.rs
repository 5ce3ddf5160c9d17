use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Per-user boolean completion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionFlag {
    /// Profile capture form has been submitted.
    ProfileComplete,
    /// Intro media has been watched (or skipped after a timeout).
    OnboardingComplete,
    /// User agreement has been accepted.
    AgreementAccepted,
}

impl CompletionFlag {
    pub const ALL: [CompletionFlag; 3] = [
        CompletionFlag::ProfileComplete,
        CompletionFlag::OnboardingComplete,
        CompletionFlag::AgreementAccepted,
    ];

    /// Storage key base; per-user keys append `-{username}`.
    pub fn key_base(&self) -> &'static str {
        match self {
            CompletionFlag::ProfileComplete => "profile-complete",
            CompletionFlag::OnboardingComplete => "onboarding-complete",
            CompletionFlag::AgreementAccepted => "agreement-accepted",
        }
    }
}

impl Display for CompletionFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key_base())
    }
}

/// Point-in-time view of every completion flag for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagSnapshot {
    pub profile_complete: bool,
    pub onboarding_complete: bool,
    pub agreement_accepted: bool,
}

impl FlagSnapshot {
    pub fn get(&self, flag: CompletionFlag) -> bool {
        match flag {
            CompletionFlag::ProfileComplete => self.profile_complete,
            CompletionFlag::OnboardingComplete => self.onboarding_complete,
            CompletionFlag::AgreementAccepted => self.agreement_accepted,
        }
    }

    pub fn set(&mut self, flag: CompletionFlag, value: bool) {
        match flag {
            CompletionFlag::ProfileComplete => self.profile_complete = value,
            CompletionFlag::OnboardingComplete => self.onboarding_complete = value,
            CompletionFlag::AgreementAccepted => self.agreement_accepted = value,
        }
    }
}

/// Encode a flag value the way the workspace front-end stores it.
pub fn encode_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Only the literal string `"true"` counts as set.
pub fn decode_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true"))
}
