//! Onboarding domain models
//!
//! Completion flags, the storage key layout shared with the workspace
//! front-end, and the captured user profile.

mod flags;
pub mod keys;
mod profile;

pub use flags::{decode_flag, encode_flag, CompletionFlag, FlagSnapshot};
pub use profile::UserProfile;
