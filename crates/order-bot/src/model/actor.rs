use order_store::UserId;
use serde::{Deserialize, Serialize};

/// The user who issued a command, as reported by the chat transport.
///
/// Only the stable `id` identifies the user; `handle` and `given_name` are
/// optional and only feed [`Actor::display_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
}

impl Actor {
    pub fn new(id: i64) -> Self {
        Self {
            id: UserId(id),
            handle: None,
            given_name: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    /// Best available label: `@handle`, then the given name, then `User <id>`.
    ///
    /// Blank handles and names count as missing.
    pub fn display_name(&self) -> String {
        if let Some(handle) = non_blank(&self.handle) {
            format!("@{handle}")
        } else if let Some(name) = non_blank(&self.given_name) {
            name.to_string()
        } else {
            format!("User {}", self.id)
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
