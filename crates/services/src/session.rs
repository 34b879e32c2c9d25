use tracing::info;

use topics_core::Clock;
use topics_core::model::{Session, UserKey};

use crate::credentials::CredentialDirectory;
use crate::error::AuthError;
use crate::notifications::{Notification, Notifications};
use crate::topics::TopicService;

/// Owns the identity of the current user and drives the login/logout
/// transitions, delegating all topic save/restore work to `TopicService`.
///
/// State machine: anonymous -> authenticated only via a successful
/// `authenticate`; authenticated -> anonymous only via `end_session`.
pub struct SessionService {
    credentials: CredentialDirectory,
    clock: Clock,
    notifications: Notifications,
    current: Option<Session>,
}

impl SessionService {
    #[must_use]
    pub fn new(credentials: CredentialDirectory, clock: Clock, notifications: Notifications) -> Self {
        Self {
            credentials,
            clock,
            notifications,
            current: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The progress storage key of the active session, if any.
    #[must_use]
    pub fn current_key(&self) -> Option<UserKey> {
        self.current.as_ref().map(|s| s.key().clone())
    }

    /// Establish a session for a matching credential record and seed the
    /// active topic list from that user's saved progress.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionActive` while a session is active; the
    /// prior session must be ended first. Returns
    /// `AuthError::InvalidCredentials` when no record matches; the prior
    /// (anonymous) state is left untouched. Returns `AuthError::Storage` if
    /// restoring saved progress fails; no session is established.
    pub fn authenticate(
        &mut self,
        topics: &mut TopicService,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if self.current.is_some() {
            return Err(AuthError::SessionActive);
        }

        let record = self
            .credentials
            .verify(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::new(
            record.key().clone(),
            record.display_name(),
            self.clock.now(),
        );
        topics.restore_into_active(session.key())?;

        info!(user = %session.key(), "session started");
        self.notifications.push(Notification::Welcome {
            name: session.display_name().to_owned(),
            at: session.started_at(),
        });
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Save the active topic list under the current key, then clear both
    /// the list and the identity back to the anonymous state. Safe to call
    /// with an empty list, and a no-op when no session is active.
    ///
    /// Returns the session that was ended, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the save fails; the session stays
    /// active so nothing is lost.
    pub fn end_session(
        &mut self,
        topics: &mut TopicService,
    ) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.current.as_ref() else {
            return Ok(None);
        };

        topics.save_active(session.key())?;
        topics.clear_active();
        let session = self.current.take();
        if let Some(session) = &session {
            info!(user = %session.key(), "session ended");
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::repository::InMemoryProgress;
    use topics_core::time::fixed_clock;

    fn build_services() -> (SessionService, TopicService) {
        let notifications = Notifications::new();
        let session = SessionService::new(
            CredentialDirectory::demo(),
            fixed_clock(),
            notifications.clone(),
        );
        let topics = TopicService::new(Arc::new(InMemoryProgress::new()), notifications);
        (session, topics)
    }

    #[test]
    fn authenticate_establishes_a_session() {
        let (mut session, mut topics) = build_services();

        let established = session
            .authenticate(&mut topics, "john@example.com", "john123")
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(established.display_name(), "John");
        assert_eq!(session.current_key().unwrap().as_str(), "john@example.com");
    }

    #[test]
    fn invalid_credentials_leave_state_untouched() {
        let (mut session, mut topics) = build_services();

        let err = session
            .authenticate(&mut topics, "john@example.com", "wrong")
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn second_authenticate_requires_ending_the_first() {
        let (mut session, mut topics) = build_services();

        session
            .authenticate(&mut topics, "john@example.com", "john123")
            .unwrap();
        let err = session
            .authenticate(&mut topics, "jane@example.com", "jane123")
            .unwrap_err();

        assert!(matches!(err, AuthError::SessionActive));
        assert_eq!(session.current().unwrap().display_name(), "John");
    }

    #[test]
    fn end_session_without_a_session_is_a_noop() {
        let (mut session, mut topics) = build_services();
        assert!(session.end_session(&mut topics).unwrap().is_none());
    }

    #[test]
    fn end_session_returns_the_ended_session() {
        let (mut session, mut topics) = build_services();

        session
            .authenticate(&mut topics, "jane@example.com", "jane123")
            .unwrap();
        let ended = session.end_session(&mut topics).unwrap().unwrap();

        assert_eq!(ended.display_name(), "Jane");
        assert!(!session.is_authenticated());
    }
}
