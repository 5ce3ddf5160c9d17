//! Console adapters for the UI-facing ports.
//!
//! The CLI has no window to render into, so navigation, toasts, tour
//! popovers and the intro animation become one-line messages on a
//! [`ConsoleSink`]. Stdout stays reserved for command results.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use cc_app::AppEventBus;
use cc_core::ports::{
    IntroMediaPort, NavigationPort, Notification, NotificationLevel, NotificationPort,
    TourPresenterPort,
};
use cc_core::tour::{AppView, StepDefinition};
use cc_core::AppEvent;
use tracing::debug;

/// Destination for console adapter messages.
#[derive(Clone, Default)]
pub enum ConsoleSink {
    #[default]
    Stderr,
    /// Collects lines in memory instead of printing them.
    Buffer(Arc<Mutex<Vec<String>>>),
}

impl ConsoleSink {
    pub fn buffer() -> Self {
        ConsoleSink::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn line(&self, line: impl Into<String>) {
        let line = line.into();
        match self {
            ConsoleSink::Stderr => eprintln!("{line}"),
            ConsoleSink::Buffer(lines) => lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(line),
        }
    }

    /// Lines collected so far. Always empty for [`ConsoleSink::Stderr`].
    pub fn lines(&self) -> Vec<String> {
        match self {
            ConsoleSink::Stderr => Vec::new(),
            ConsoleSink::Buffer(lines) => lines
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        }
    }
}

pub struct ConsoleNavigation {
    sink: ConsoleSink,
}

impl ConsoleNavigation {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl NavigationPort for ConsoleNavigation {
    async fn navigate_to(&self, view: AppView) -> Result<()> {
        self.sink.line(format!("[navigate] {view}"));
        Ok(())
    }
}

pub struct ConsoleNotifier {
    sink: ConsoleSink,
}

impl ConsoleNotifier {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl NotificationPort for ConsoleNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        let level = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
        };
        self.sink.line(format!(
            "[{level}] {}: {}",
            notification.title, notification.message
        ));
        Ok(())
    }
}

pub struct ConsolePresenter {
    sink: ConsoleSink,
}

impl ConsolePresenter {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl TourPresenterPort for ConsolePresenter {
    async fn show_step(&self, step: &StepDefinition, index: usize, total: usize) -> Result<()> {
        self.sink.line(format!(
            "[tour {}/{}] {}: {} (on {}, finish with `{}`)",
            index + 1,
            total,
            step.title,
            step.text,
            step.target,
            step.trigger
        ));
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        self.sink.line("[tour] hidden");
        Ok(())
    }
}

/// Intro "animation" that prints a banner and finishes immediately.
pub struct ConsoleIntroMedia {
    sink: ConsoleSink,
    events: AppEventBus,
}

impl ConsoleIntroMedia {
    pub fn new(sink: ConsoleSink, events: AppEventBus) -> Self {
        Self { sink, events }
    }
}

#[async_trait]
impl IntroMediaPort for ConsoleIntroMedia {
    async fn wait_until_ready(&self) -> bool {
        true
    }

    async fn start(&self) -> Result<()> {
        self.sink.line("[intro] Welcome to CareConnect Pro");
        self.events
            .publish(AppEvent::IntroMediaComplete { timed_out: false })
            .await;
        debug!("console intro media finished");
        Ok(())
    }
}
