//! Typed identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a conversant.
///
/// Wraps the Telegram chat id so the domain never passes raw integers around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Creates a user id from a raw chat id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw chat id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
