use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storage::repository::{InMemoryProgress, ProgressRepository};
use topics_core::Clock;
use topics_core::model::{FetchStatus, ProgressSummary, Session, Topic, TopicId};

use crate::credentials::CredentialDirectory;
use crate::error::{AuthError, TopicServiceError};
use crate::notifications::{Notification, Notifications};
use crate::session::SessionService;
use crate::topic_source::{HttpTopicSource, TopicSource};
use crate::topics::TopicService;

struct AppState {
    session: SessionService,
    topics: TopicService,
}

/// Assembles the session and topic services over shared collaborators and
/// exposes the surface the screens read and write.
///
/// Writes are restricted to the five operations (`authenticate`,
/// `end_session`, `refresh_topics`, `mark_completed`, `reset_progress`);
/// everything else is a read. All synchronous operations are atomic with
/// respect to each other: the state lock is held for the whole operation,
/// and it is released across the network await inside `refresh_topics`, so
/// an in-flight fetch never blocks them.
pub struct AppServices {
    state: Mutex<AppState>,
    source: Arc<dyn TopicSource>,
    notifications: Notifications,
}

impl AppServices {
    #[must_use]
    pub fn new(
        credentials: CredentialDirectory,
        progress: Arc<dyn ProgressRepository>,
        source: Arc<dyn TopicSource>,
        clock: Clock,
    ) -> Self {
        let notifications = Notifications::new();
        Self {
            state: Mutex::new(AppState {
                session: SessionService::new(credentials, clock, notifications.clone()),
                topics: TopicService::new(progress, notifications.clone()),
            }),
            source,
            notifications,
        }
    }

    /// Demo assembly: the built-in accounts, an in-memory progress map,
    /// and the HTTP topic source configured from the environment.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            CredentialDirectory::demo(),
            Arc::new(InMemoryProgress::new()),
            Arc::new(HttpTopicSource::from_env()),
            Clock::default(),
        )
    }

    // A poisoned lock still yields the state; no operation leaves it
    // half-updated on unwind.
    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log in. On success the active topic list is seeded from the user's
    /// saved progress and a welcome notification is queued.
    ///
    /// # Errors
    ///
    /// See [`SessionService::authenticate`].
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut state = self.lock();
        let state = &mut *state;
        state.session.authenticate(&mut state.topics, email, password)
    }

    /// Log out: save the active list under the current user, then return to
    /// the anonymous state. A no-op when nobody is logged in.
    ///
    /// # Errors
    ///
    /// See [`SessionService::end_session`].
    pub fn end_session(&self) -> Result<Option<Session>, AuthError> {
        let mut state = self.lock();
        let state = &mut *state;
        state.session.end_session(&mut state.topics)
    }

    /// Fetch the topic list from the remote source and reconcile it with the
    /// current user's saved progress.
    ///
    /// The fetch is stamped with the session active when it was issued; if a
    /// logout or login interleaves with the round trip, the result is
    /// discarded silently and `false` is returned. Callers should avoid
    /// issuing a second fetch while one is in flight.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Source` when the remote call fails (the
    /// failure is also recorded in the fetch status) and
    /// `TopicServiceError::Storage` when persisting the merge fails.
    pub async fn refresh_topics(&self) -> Result<bool, TopicServiceError> {
        let ticket = {
            let mut state = self.lock();
            let issued_for = state.session.current_key();
            state.topics.begin_fetch(issued_for)
        };

        let outcome = self.source.list_topics().await;

        let mut state = self.lock();
        let current = state.session.current_key();
        state.topics.complete_fetch(ticket, outcome, current.as_ref())
    }

    /// Mark a topic completed. Persists immediately while logged in, and
    /// silently does nothing for unknown or already-completed ids.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if persistence fails.
    pub fn mark_completed(&self, id: TopicId) -> Result<bool, TopicServiceError> {
        let mut state = self.lock();
        let key = state.session.current_key();
        Ok(state.topics.mark_completed(id, key.as_ref())?)
    }

    /// Reset every completion flag in the active list.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if persistence fails.
    pub fn reset_progress(&self) -> Result<(), TopicServiceError> {
        let mut state = self.lock();
        let key = state.session.current_key();
        Ok(state.topics.reset_progress(key.as_ref())?)
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.lock().session.current().cloned()
    }

    #[must_use]
    pub fn topics(&self) -> Vec<Topic> {
        self.lock().topics.topics().to_vec()
    }

    #[must_use]
    pub fn topic(&self, id: TopicId) -> Option<Topic> {
        self.lock().topics.topic(id).cloned()
    }

    #[must_use]
    pub fn fetch_status(&self) -> FetchStatus {
        self.lock().topics.fetch_status().clone()
    }

    /// The last fetch failure message, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().topics.last_error().map(str::to_owned)
    }

    #[must_use]
    pub fn progress_summary(&self) -> ProgressSummary {
        self.lock().topics.progress_summary()
    }

    /// Take all queued notifications, oldest first.
    #[must_use]
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
