//! Port interfaces for the application layer
//!
//! Ports define the contract between the onboarding use cases and the
//! infrastructure or shell that hosts them. Every collaborator the flow
//! needs is reached through one of these traits; the application layer
//! ships a null-object implementation of each.

pub mod app_dirs;
mod agreement;
mod auth;
mod clock;
pub mod errors;
mod media;
mod navigation;
mod notification;
mod presenter;
mod profile;
mod storage;

pub use agreement::AgreementPort;
pub use app_dirs::AppDirsPort;
pub use auth::AuthProviderPort;
pub use clock::*;
pub use errors::{AppDirsError, StorageError};
pub use media::IntroMediaPort;
pub use navigation::NavigationPort;
pub use notification::{Notification, NotificationLevel, NotificationPort};
pub use presenter::TourPresenterPort;
pub use profile::ProfileCapturePort;
pub use storage::KeyValueStorePort;
