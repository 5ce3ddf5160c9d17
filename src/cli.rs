//! `careconnect` command line.
//!
//! Each invocation is one short session: the runtime is rebuilt from the
//! store file, the command runs, and its result is printed to stdout as
//! JSON. Console adapters (toasts, tour popovers, navigation) write to
//! stderr.

use std::path::PathBuf;

use anyhow::{bail, Context};
use cc_app::usecases::{OnboardingStatusDto, TourSequencer};
use cc_app::AppEventBus;
use cc_core::identity::UserId;
use cc_core::ids::EventName;
use cc_infra::DirsAppDirsAdapter;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info_span, Instrument};

use crate::adapters::{ConsoleSink, FormAnswers};
use crate::bootstrap::tracing::{init_tracing_subscriber, TracingOptions};
use crate::bootstrap::{resolve_config, wire_dependencies, AppRuntime, ResolvedConfig};

#[derive(Parser, Debug)]
#[command(name = "careconnect")]
#[command(about = "CareConnect Pro onboarding and guided-tour tracker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory, overriding the config file and platform default
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show flags, profile and tour progress for a user
    Status { user: String },

    /// Sign a user in and run whatever onboarding they are due
    Login {
        user: String,

        /// Login role; configured bypass roles skip onboarding
        #[arg(long)]
        role: Option<String>,

        /// Name for the profile form; the form is skipped without it
        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        /// Accept the terms of use when the agreement step is enabled
        #[arg(long)]
        accept_terms: bool,
    },

    /// Drive a user's guided tour
    Tour {
        #[command(subcommand)]
        action: TourAction,
    },

    /// Record a feature action (tour trigger) performed by a user
    Event {
        user: String,
        trigger: String,

        /// Record progress without bringing back an in-progress tour
        #[arg(long)]
        background: bool,
    },

    /// Clear every onboarding record for a user
    Reset { user: String },

    /// List the guided-tour steps
    Steps,
}

#[derive(Subcommand, Debug)]
pub enum TourAction {
    /// Start the tour, or restart a dismissed one where it stopped
    Start { user: String },
    /// Finish the current step
    Next { user: String },
    /// Show the previous step
    Prev { user: String },
    /// Show step N (1-based)
    Goto { user: String, step: usize },
    /// Close the tour and stop offering it
    Dismiss { user: String },
}

impl Cli {
    /// Form answers carried by `login`; empty for other commands.
    pub fn form_answers(&self) -> FormAnswers {
        match &self.command {
            Commands::Login {
                role,
                display_name,
                organization,
                accept_terms,
                ..
            } => FormAnswers {
                display_name: display_name.clone(),
                role: role.clone(),
                organization: organization.clone(),
                accept_terms: *accept_terms,
            },
            _ => FormAnswers::default(),
        }
    }
}

/// Status plus the completion time rendered as a timestamp.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    #[serde(flatten)]
    status: OnboardingStatusDto,
    tour_completed_at: Option<DateTime<Utc>>,
}

fn parse_user(raw: &str) -> anyhow::Result<UserId> {
    UserId::parse(raw).context("user name must not be blank")
}

/// Wire dependencies and build the runtime for one invocation.
pub fn build_runtime(
    cli: &Cli,
    resolved: &ResolvedConfig,
    sink: ConsoleSink,
) -> anyhow::Result<AppRuntime> {
    let events = AppEventBus::new();
    let deps = wire_dependencies(&resolved.paths, &events, sink, cli.form_answers());
    AppRuntime::new(deps, events, &resolved.config)
}

/// Run `command` against `runtime` and return its JSON result.
pub async fn execute(command: &Commands, runtime: &AppRuntime) -> anyhow::Result<Value> {
    let uc = runtime.usecases();
    match command {
        Commands::Status { user } => {
            let user = parse_user(user)?;
            let status = uc.get_onboarding_status().execute(&user).await;
            let report = StatusReport {
                tour_completed_at: status.tour.completed_at_utc(),
                status,
            };
            Ok(serde_json::to_value(report)?)
        }
        Commands::Login { user, role, .. } => {
            parse_user(user)?;
            let outcome = uc
                .login_coordinator()
                .on_login(user, role.as_deref())
                .await;
            Ok(serde_json::to_value(outcome)?)
        }
        Commands::Tour { action } => tour(action, runtime).await,
        Commands::Event {
            user,
            trigger,
            background,
        } => {
            let user = parse_user(user)?;
            let sequencer = uc.tour_sequencer();
            // Show the tour if one is in progress, so the trigger advances it.
            if !background {
                sequencer.resume(&user).await;
            }
            let outcome = sequencer
                .handle_event(&user, &EventName::from(trigger.trim()))
                .await;
            Ok(serde_json::to_value(outcome)?)
        }
        Commands::Reset { user } => {
            let user = parse_user(user)?;
            uc.reset_onboarding().execute(&user).await;
            Ok(json!({ "user": user, "reset": true }))
        }
        Commands::Steps => {
            let sequencer = uc.tour_sequencer();
            let steps: Vec<_> = sequencer.catalog().iter().collect();
            Ok(serde_json::to_value(steps)?)
        }
    }
}

async fn tour(action: &TourAction, runtime: &AppRuntime) -> anyhow::Result<Value> {
    let sequencer = runtime.usecases().tour_sequencer();
    let value = match action {
        TourAction::Start { user } => {
            let user = parse_user(user)?;
            serde_json::to_value(sequencer.start(&user).await)?
        }
        TourAction::Next { user } => {
            resume_tour(&sequencer, user).await?;
            serde_json::to_value(sequencer.next().await?)?
        }
        TourAction::Prev { user } => {
            resume_tour(&sequencer, user).await?;
            serde_json::to_value(sequencer.prev().await?)?
        }
        TourAction::Goto { user, step } => {
            if *step == 0 {
                bail!("steps are numbered from 1");
            }
            resume_tour(&sequencer, user).await?;
            serde_json::to_value(sequencer.jump_to(step - 1).await?)?
        }
        TourAction::Dismiss { user } => {
            resume_tour(&sequencer, user).await?;
            serde_json::to_value(sequencer.dismiss().await)?
        }
    };
    Ok(value)
}

/// Bring back the tour a previous invocation left in progress.
async fn resume_tour(sequencer: &TourSequencer, raw_user: &str) -> anyhow::Result<()> {
    let user = parse_user(raw_user)?;
    if sequencer.resume(&user).await.is_none() {
        bail!("{user} has no tour in progress; run `careconnect tour start {user}`");
    }
    Ok(())
}

/// Entry point used by `main`.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let resolved = resolve_config(
        cli.config.clone(),
        cli.data_dir.clone(),
        &DirsAppDirsAdapter::new(),
    )?;

    let log_to_file = resolved.config.log_to_file.unwrap_or(true);
    init_tracing_subscriber(&TracingOptions {
        debug: cli.debug,
        level: resolved.config.log_level.clone(),
        logs_dir: log_to_file.then(|| resolved.paths.logs_dir.clone()),
    })?;
    debug!(
        config = ?resolved.config_path,
        store = %resolved.paths.store_path.display(),
        "configuration resolved"
    );

    let runtime = build_runtime(&cli, &resolved, ConsoleSink::Stderr)?;
    let span = info_span!("cli.command", command = ?cli.command);
    let output = execute(&cli.command, &runtime).instrument(span).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "careconnect",
            "login",
            "jdoe",
            "--display-name",
            "Jane Doe",
            "--data-dir",
            "/tmp/cc",
            "--debug",
        ])
        .unwrap();

        assert!(cli.debug);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/cc")));
        assert_eq!(
            cli.form_answers(),
            FormAnswers {
                display_name: Some("Jane Doe".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn parses_tour_goto() {
        let cli = Cli::try_parse_from(["careconnect", "tour", "goto", "jdoe", "3"]).unwrap();

        match cli.command {
            Commands::Tour {
                action: TourAction::Goto { user, step },
            } => {
                assert_eq!(user, "jdoe");
                assert_eq!(step, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let steps = Cli::try_parse_from(["careconnect", "steps"]).unwrap();
        assert_eq!(steps.form_answers(), FormAnswers::default());
    }

    #[test]
    fn parses_background_event() {
        let cli = Cli::try_parse_from([
            "careconnect",
            "event",
            "jdoe",
            "report-generated",
            "--background",
        ])
        .unwrap();

        match cli.command {
            Commands::Event {
                trigger,
                background,
                ..
            } => {
                assert_eq!(trigger, "report-generated");
                assert!(background);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn blank_user_is_rejected() {
        assert!(parse_user("  ").is_err());
        assert_eq!(parse_user(" JDoe ").unwrap(), UserId::new("jdoe"));
    }
}
