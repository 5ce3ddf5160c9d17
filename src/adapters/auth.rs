use cc_core::ports::AuthProviderPort;

/// Environment variable naming the signed-in user for CLI sessions.
pub const USER_ENV: &str = "CARECONNECT_USER";

/// Reads the authenticated user from `CARECONNECT_USER`.
#[derive(Debug, Default)]
pub struct EnvAuthProvider;

impl AuthProviderPort for EnvAuthProvider {
    fn current_user(&self) -> Option<String> {
        std::env::var(USER_ENV)
            .ok()
            .filter(|user| !user.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn blank_variable_means_no_user() {
        let _guard = env_lock().lock().unwrap_or_else(|e| e.into_inner());
        let previous = std::env::var(USER_ENV).ok();

        std::env::set_var(USER_ENV, "  ");
        assert_eq!(EnvAuthProvider.current_user(), None);

        std::env::set_var(USER_ENV, "jdoe");
        assert_eq!(EnvAuthProvider.current_user(), Some("jdoe".to_string()));

        match previous {
            Some(value) => std::env::set_var(USER_ENV, value),
            None => std::env::remove_var(USER_ENV),
        }
    }
}
