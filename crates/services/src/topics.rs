use std::sync::Arc;

use tracing::{debug, warn};

use storage::repository::{ProgressRepository, StorageError};
use topics_core::merge;
use topics_core::model::{FetchStatus, ProgressSummary, Topic, TopicId, UserKey};

use crate::error::{TopicServiceError, TopicSourceError};
use crate::notifications::{Notification, Notifications};
use crate::topic_source::RawTopic;

/// Stamp for an in-flight fetch: the session key active when it was issued.
///
/// A resolved fetch is applied only if its stamp still matches the active
/// key, so a login or logout that interleaves with the network round trip
/// can never merge one user's result into another user's list.
#[must_use]
pub struct FetchTicket {
    issued_for: Option<UserKey>,
}

/// Owns the active topic list for the current session and the handle to
/// per-user saved progress. All progress map mutation routes through here.
pub struct TopicService {
    progress: Arc<dyn ProgressRepository>,
    notifications: Notifications,
    topics: Vec<Topic>,
    status: FetchStatus,
}

impl TopicService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressRepository>, notifications: Notifications) -> Self {
        Self {
            progress,
            notifications,
            topics: Vec::new(),
            status: FetchStatus::Idle,
        }
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Look up a topic in the active list by id.
    #[must_use]
    pub fn topic(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn fetch_status(&self) -> &FetchStatus {
        &self.status
    }

    /// The last fetch failure message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.status.error_message()
    }

    #[must_use]
    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary::of(&self.topics)
    }

    /// Seed the active list from `key`'s saved entry, flags exactly as last
    /// persisted. Leaves the active list untouched when no entry exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    pub fn restore_into_active(&mut self, key: &UserKey) -> Result<(), StorageError> {
        if let Some(saved) = self.progress.restore(key)? {
            debug!(user = %key, topics = saved.len(), "restored saved progress");
            self.topics = saved;
        }
        Ok(())
    }

    /// Save the active list under `key`. Safe to call with an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails.
    pub fn save_active(&mut self, key: &UserKey) -> Result<(), StorageError> {
        self.progress.save(key, &self.topics)
    }

    /// Mark the topic with `id` completed and, when a session key is given,
    /// persist the updated list immediately.
    ///
    /// Produces a new active-list snapshot; the list is swapped only after
    /// persistence succeeds. Returns `false` without error when the id is
    /// absent or the topic is already completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails; the active list is left
    /// as it was.
    pub fn mark_completed(
        &mut self,
        id: TopicId,
        key: Option<&UserKey>,
    ) -> Result<bool, StorageError> {
        let Some(target) = self.topic(id) else {
            return Ok(false);
        };
        if target.is_completed() {
            return Ok(false);
        }
        let title = target.title().to_owned();

        let next: Vec<Topic> = self
            .topics
            .iter()
            .map(|t| {
                let mut t = t.clone();
                if t.id() == id {
                    t.complete();
                }
                t
            })
            .collect();

        if let Some(key) = key {
            self.progress.save(key, &next)?;
        }
        self.topics = next;
        debug!(topic = %id, "topic completed");
        self.notifications.push(Notification::TopicCompleted { id, title });
        Ok(true)
    }

    /// Clear the completion flag on every topic in the active list and, when
    /// a session key is given, persist the reset list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persistence fails; the active list is left
    /// as it was.
    pub fn reset_progress(&mut self, key: Option<&UserKey>) -> Result<(), StorageError> {
        let next: Vec<Topic> = self
            .topics
            .iter()
            .map(|t| {
                let mut t = t.clone();
                t.clear_completed();
                t
            })
            .collect();

        if let Some(key) = key {
            self.progress.save(key, &next)?;
        }
        self.topics = next;
        Ok(())
    }

    /// Drop the active list, leaving saved entries untouched. Runs on
    /// logout so the next user never sees the departing user's flags.
    pub fn clear_active(&mut self) {
        self.topics.clear();
    }

    /// Move the fetch state machine to `Loading` and stamp the in-flight
    /// fetch with the session key active right now.
    ///
    /// Only one fetch should be in flight at a time; the store does not
    /// deduplicate concurrent calls, that is the caller's responsibility.
    pub fn begin_fetch(&mut self, issued_for: Option<UserKey>) -> FetchTicket {
        if self.status.is_loading() {
            debug!("fetch issued while a fetch was already in flight");
        }
        self.status = FetchStatus::Loading;
        FetchTicket { issued_for }
    }

    /// Resolve an in-flight fetch against whatever session is active now.
    ///
    /// Raw posts are re-sequenced into ids 1..N by position. While a session
    /// is authenticated, saved completion flags are merged onto the fresh
    /// list and the merged list is persisted; anonymous fetches use the list
    /// as-is. A result whose ticket no longer matches the active key is
    /// discarded silently and the status returns to `Idle`.
    ///
    /// Returns `true` when the fetched list was applied.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Source` when the fetch itself failed, and
    /// `TopicServiceError::Storage` when the merge could not be persisted.
    /// In both cases the active list is left exactly as before.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<RawTopic>, TopicSourceError>,
        current: Option<&UserKey>,
    ) -> Result<bool, TopicServiceError> {
        if ticket.issued_for.as_ref() != current {
            warn!("discarding fetch result issued under a different session");
            self.status = FetchStatus::Idle;
            return Ok(false);
        }

        let raw = match outcome {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "topic fetch failed");
                self.status = FetchStatus::Failed(err.to_string());
                return Err(TopicServiceError::Source(err));
            }
        };

        let fetched: Vec<Topic> = raw
            .into_iter()
            .enumerate()
            .map(|(position, post)| Topic::from_listing(position, post.title, post.body))
            .collect();

        let next = match current {
            Some(key) => {
                let saved = match self.progress.restore(key) {
                    Ok(saved) => saved,
                    Err(err) => return Err(self.fail_storage(err)),
                };
                let merged = match saved {
                    Some(saved) => merge::carry_completed_flags(fetched, &saved),
                    None => fetched,
                };
                if let Err(err) = self.progress.save(key, &merged) {
                    return Err(self.fail_storage(err));
                }
                merged
            }
            None => fetched,
        };

        debug!(topics = next.len(), "topic fetch applied");
        self.topics = next;
        self.status = FetchStatus::Succeeded;
        Ok(true)
    }

    /// Record a storage failure in the fetch status while propagating it.
    fn fail_storage(&mut self, err: StorageError) -> TopicServiceError {
        self.status = FetchStatus::Failed(err.to_string());
        TopicServiceError::Storage(err)
    }
}
