//! Common data types for jwt-gate components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user in the identity store.
///
/// Serialized transparently, so the `sub` claim of a token for user 42 is
/// the JSON integer `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Raw integer value, as stored in the `users.id` column.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
