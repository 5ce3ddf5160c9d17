/// External authentication provider.
///
/// Returns the username of the currently authenticated user, if the host
/// application knows one. Lookups must be cheap and side-effect free.
pub trait AuthProviderPort: Send + Sync {
    fn current_user(&self) -> Option<String>;
}
