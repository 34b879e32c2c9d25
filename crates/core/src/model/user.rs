use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key into progress storage: the user's email.
///
/// Matching is exact; no normalization is applied.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserKey(String);

impl UserKey {
    /// Creates a new `UserKey`
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Returns the underlying email
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserKey({})", self.0)
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The currently authenticated user identity.
///
/// Exactly one session is active at a time; "no session" is represented by
/// the absence of a `Session`, not by a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    key: UserKey,
    display_name: String,
    started_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(key: UserKey, display_name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            key,
            display_name: display_name.into(),
            started_at,
        }
    }

    #[must_use]
    pub fn key(&self) -> &UserKey {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
