//! Shell-side implementations of the collaborator ports.

pub mod auth;
pub mod console;
pub mod forms;

pub use auth::EnvAuthProvider;
pub use console::{
    ConsoleIntroMedia, ConsoleNavigation, ConsoleNotifier, ConsolePresenter, ConsoleSink,
};
pub use forms::{ArgsAgreement, ArgsProfileCapture, FormAnswers};
