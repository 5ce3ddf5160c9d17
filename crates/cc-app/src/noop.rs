//! Null-object collaborators.
//!
//! Absence of a host collaborator is a designed case: each port has a
//! stand-in that does nothing and reports "not available" where a result is
//! needed.

use anyhow::Result;
use async_trait::async_trait;
use cc_core::{
    identity::UserId,
    onboarding::UserProfile,
    ports::{
        AgreementPort, AuthProviderPort, IntroMediaPort, NavigationPort, Notification,
        NotificationPort, ProfileCapturePort, TourPresenterPort,
    },
    tour::{AppView, StepDefinition},
};

pub struct NoopAuthProvider;

impl AuthProviderPort for NoopAuthProvider {
    fn current_user(&self) -> Option<String> {
        None
    }
}

pub struct NoopNavigation;

#[async_trait]
impl NavigationPort for NoopNavigation {
    async fn navigate_to(&self, _view: AppView) -> Result<()> {
        Ok(())
    }
}

pub struct NoopNotifier;

#[async_trait]
impl NotificationPort for NoopNotifier {
    async fn notify(&self, _notification: Notification) -> Result<()> {
        Ok(())
    }
}

pub struct NoopTourPresenter;

#[async_trait]
impl TourPresenterPort for NoopTourPresenter {
    async fn show_step(&self, _step: &StepDefinition, _index: usize, _total: usize) -> Result<()> {
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        Ok(())
    }
}

/// A media controller that is never ready.
pub struct NoopIntroMedia;

#[async_trait]
impl IntroMediaPort for NoopIntroMedia {
    async fn wait_until_ready(&self) -> bool {
        false
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }
}

/// A profile form the user always skips.
pub struct NoopProfileCapture;

#[async_trait]
impl ProfileCapturePort for NoopProfileCapture {
    async fn capture(&self, _user: &UserId) -> Result<Option<UserProfile>> {
        Ok(None)
    }
}

/// An agreement prompt that is never accepted.
pub struct NoopAgreement;

#[async_trait]
impl AgreementPort for NoopAgreement {
    async fn request_acceptance(&self, _user: &UserId) -> Result<bool> {
        Ok(false)
    }
}
