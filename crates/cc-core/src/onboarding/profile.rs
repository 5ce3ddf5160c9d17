use serde::{Deserialize, Serialize};

/// Details captured by the first-login profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub display_name: String,
    pub role: Option<String>,
    pub organization: Option<String>,
    /// Epoch milliseconds.
    pub captured_at: Option<i64>,
}

impl UserProfile {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }
}
