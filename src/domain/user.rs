use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the marketplace the session user is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Courier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Courier => write!(f, "courier"),
        }
    }
}

/// The person driving the current session.
///
/// The display name doubles as the client name on orders they create and as the
/// courier name on orders they accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub role: Option<Role>,
}

impl User {
    /// Creates a user who has not picked a role yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }
}
