use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a Topic within a topic list.
///
/// Ids are assigned positionally (1..N) when a list is built from the remote
/// source, so they are only stable for lists of the same shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicId(u64);

impl TopicId {
    /// Creates a new `TopicId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the id for the topic at `position` in a fetched list.
    #[must_use]
    pub fn from_position(position: usize) -> Self {
        Self(position as u64 + 1)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `TopicId` from a route or query parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse TopicId from string")]
pub struct ParseIdError;

impl FromStr for TopicId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(TopicId::new).map_err(|_| ParseIdError)
    }
}
