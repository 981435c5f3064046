use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric account identifier, rendered verbatim into settings URIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An account as seen by the settings subsystem: either the target user or the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub is_administrator: bool,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self { id: id.into(), username: username.into(), is_administrator: false }
    }

    /// Same identity with the administrator bit set.
    #[must_use]
    pub const fn administrator(mut self) -> Self {
        self.is_administrator = true;
        self
    }

    #[must_use]
    pub fn is_same_account(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
