//! Storage key layout.
//!
//! These prefixes are read by other parts of the workspace front-end and
//! must not change.

use crate::identity::UserId;
use crate::onboarding::CompletionFlag;

pub const TOUR_KEY_PREFIX: &str = "tour";
pub const PROFILE_KEY_PREFIX: &str = "user-profile";
pub const SESSION_USER_KEY: &str = "session-user";

pub fn flag_key(flag: CompletionFlag, user: &UserId) -> String {
    format!("{}-{}", flag.key_base(), user.storage_suffix())
}

/// Un-suffixed key written before per-user namespacing existed.
pub fn global_flag_key(flag: CompletionFlag) -> &'static str {
    flag.key_base()
}

pub fn tour_key(user: &UserId) -> String {
    format!("{TOUR_KEY_PREFIX}-{}", user.storage_suffix())
}

pub fn profile_key(user: &UserId) -> String {
    format!("{PROFILE_KEY_PREFIX}-{}", user.storage_suffix())
}

/// Every per-user key owned by the onboarding subsystem.
pub fn user_keys(user: &UserId) -> Vec<String> {
    let mut keys: Vec<String> = CompletionFlag::ALL
        .iter()
        .map(|flag| flag_key(*flag, user))
        .collect();
    keys.push(tour_key(user));
    keys.push(profile_key(user));
    keys
}

/// Whether `key` is a per-user key of this subsystem (any user).
pub fn is_user_scoped_key(key: &str) -> bool {
    let prefixes = CompletionFlag::ALL
        .iter()
        .map(|flag| flag.key_base())
        .chain([TOUR_KEY_PREFIX, PROFILE_KEY_PREFIX]);

    for prefix in prefixes {
        if let Some(rest) = key.strip_prefix(prefix) {
            if rest.len() > 1 && rest.starts_with('-') {
                return true;
            }
        }
    }
    false
}
