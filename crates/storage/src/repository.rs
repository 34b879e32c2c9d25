use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use topics_core::model::{Topic, TopicId, UserKey};

/// Errors surfaced by progress storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),
}

/// Persisted shape for a topic.
///
/// This mirrors the domain `Topic` so repositories can copy lists by value
/// without leaking storage concerns into the domain layer. A saved entry
/// must never alias the active list it was copied from.
#[derive(Debug, Clone)]
pub struct TopicRecord {
    pub id: TopicId,
    pub title: String,
    pub content: String,
    pub completed: bool,
}

impl TopicRecord {
    #[must_use]
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            id: topic.id(),
            title: topic.title().to_owned(),
            content: topic.content().to_owned(),
            completed: topic.is_completed(),
        }
    }

    /// Convert the record back into a domain `Topic`.
    #[must_use]
    pub fn into_topic(self) -> Topic {
        Topic::from_persisted(self.id, self.title, self.content, self.completed)
    }
}

/// Repository contract for per-user topic progress.
///
/// The entry for a key always reflects the most recent save for that key.
/// Entries are never deleted; a key that has never been saved has no entry.
pub trait ProgressRepository: Send + Sync {
    /// Overwrite the saved entry for `key` with a positional copy of `topics`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    fn save(&self, key: &UserKey, topics: &[Topic]) -> Result<(), StorageError>;

    /// Fetch the saved list for `key`, flags exactly as last persisted.
    ///
    /// Returns `Ok(None)` when no entry exists. Pure lookup, no mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    fn restore(&self, key: &UserKey) -> Result<Option<Vec<Topic>>, StorageError>;
}

/// In-memory progress map. Holds entries for the process lifetime only.
#[derive(Clone, Default)]
pub struct InMemoryProgress {
    entries: Arc<Mutex<HashMap<UserKey, Vec<TopicRecord>>>>,
}

impl InMemoryProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl ProgressRepository for InMemoryProgress {
    fn save(&self, key: &UserKey, topics: &[Topic]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.clone(), topics.iter().map(TopicRecord::from_topic).collect());
        Ok(())
    }

    fn restore(&self, key: &UserKey) -> Result<Option<Vec<Topic>>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(key)
            .map(|records| records.iter().cloned().map(TopicRecord::into_topic).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_topics(flags: &[bool]) -> Vec<Topic> {
        flags
            .iter()
            .enumerate()
            .map(|(i, completed)| {
                let mut t = Topic::from_listing(i, format!("T{}", i + 1), "body");
                if *completed {
                    t.complete();
                }
                t
            })
            .collect()
    }

    #[test]
    fn round_trips_topics_with_flags_and_order() {
        let repo = InMemoryProgress::new();
        let key = UserKey::new("john@example.com");
        let topics = build_topics(&[false, true, false]);

        repo.save(&key, &topics).unwrap();
        let restored = repo.restore(&key).unwrap().unwrap();

        assert_eq!(restored, topics);
    }

    #[test]
    fn restore_of_unknown_key_is_none() {
        let repo = InMemoryProgress::new();
        assert!(repo.restore(&UserKey::new("nobody@example.com")).unwrap().is_none());
    }

    #[test]
    fn save_overwrites_previous_entry() {
        let repo = InMemoryProgress::new();
        let key = UserKey::new("john@example.com");

        repo.save(&key, &build_topics(&[true, true])).unwrap();
        repo.save(&key, &build_topics(&[false, false])).unwrap();

        let restored = repo.restore(&key).unwrap().unwrap();
        assert!(restored.iter().all(|t| !t.is_completed()));
    }

    #[test]
    fn saved_entry_does_not_alias_the_source_list() {
        let repo = InMemoryProgress::new();
        let key = UserKey::new("john@example.com");
        let mut topics = build_topics(&[false]);

        repo.save(&key, &topics).unwrap();
        topics[0].complete();

        let restored = repo.restore(&key).unwrap().unwrap();
        assert!(!restored[0].is_completed());
    }

    #[test]
    fn entries_are_isolated_per_key() {
        let repo = InMemoryProgress::new();
        let john = UserKey::new("john@example.com");
        let jane = UserKey::new("jane@example.com");

        repo.save(&john, &build_topics(&[true])).unwrap();
        repo.save(&jane, &build_topics(&[false])).unwrap();

        assert!(repo.restore(&john).unwrap().unwrap()[0].is_completed());
        assert!(!repo.restore(&jane).unwrap().unwrap()[0].is_completed());
    }
}
