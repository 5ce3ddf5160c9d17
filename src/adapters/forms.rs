//! Non-interactive stand-ins for the first-login forms.
//!
//! The profile form and the terms prompt are answered up front from
//! command-line flags.

use anyhow::Result;
use async_trait::async_trait;
use cc_core::identity::UserId;
use cc_core::onboarding::UserProfile;
use cc_core::ports::{AgreementPort, ProfileCapturePort};

/// Answers given on the command line for the onboarding forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAnswers {
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub organization: Option<String>,
    pub accept_terms: bool,
}

pub struct ArgsProfileCapture {
    answers: FormAnswers,
}

impl ArgsProfileCapture {
    pub fn new(answers: FormAnswers) -> Self {
        Self { answers }
    }
}

#[async_trait]
impl ProfileCapturePort for ArgsProfileCapture {
    /// Submits the profile when a display name was given, skips otherwise.
    async fn capture(&self, _user: &UserId) -> Result<Option<UserProfile>> {
        let Some(display_name) = self
            .answers
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return Ok(None);
        };

        Ok(Some(UserProfile {
            display_name: display_name.to_string(),
            role: self.answers.role.clone(),
            organization: self.answers.organization.clone(),
            captured_at: None,
        }))
    }
}

pub struct ArgsAgreement {
    accepted: bool,
}

impl ArgsAgreement {
    pub fn new(accepted: bool) -> Self {
        Self { accepted }
    }
}

#[async_trait]
impl AgreementPort for ArgsAgreement {
    async fn request_acceptance(&self, _user: &UserId) -> Result<bool> {
        Ok(self.accepted)
    }
}
