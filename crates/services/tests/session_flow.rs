use std::sync::Arc;

use async_trait::async_trait;

use services::{
    AppServices, AuthError, CredentialDirectory, Notification, RawTopic, TopicSource,
    TopicSourceError,
};
use storage::repository::{InMemoryProgress, ProgressRepository};
use topics_core::model::{TopicId, UserKey};
use topics_core::time::fixed_clock;

struct FixedSource;

#[async_trait]
impl TopicSource for FixedSource {
    async fn list_topics(&self) -> Result<Vec<RawTopic>, TopicSourceError> {
        Ok((1..=5)
            .map(|n| RawTopic {
                title: format!("T{n}"),
                body: format!("T{n} body"),
            })
            .collect())
    }
}

fn build_app() -> (AppServices, InMemoryProgress) {
    let progress = InMemoryProgress::new();
    let app = AppServices::new(
        CredentialDirectory::demo(),
        Arc::new(progress.clone()),
        Arc::new(FixedSource),
        fixed_clock(),
    );
    (app, progress)
}

#[tokio::test]
async fn logout_then_login_restores_the_flag_set_at_logout() {
    let (app, _) = build_app();

    app.authenticate("john@example.com", "john123").unwrap();
    app.refresh_topics().await.unwrap();
    app.mark_completed(TopicId::new(2)).unwrap();
    app.mark_completed(TopicId::new(4)).unwrap();
    app.end_session().unwrap();

    assert!(app.topics().is_empty());

    app.authenticate("john@example.com", "john123").unwrap();
    let topics = app.topics();
    assert_eq!(topics.len(), 5);
    for topic in &topics {
        let expected = topic.id() == TopicId::new(2) || topic.id() == TopicId::new(4);
        assert_eq!(topic.is_completed(), expected);
    }
}

#[tokio::test]
async fn reset_before_logout_is_what_the_next_login_sees() {
    let (app, _) = build_app();

    app.authenticate("john@example.com", "john123").unwrap();
    app.refresh_topics().await.unwrap();
    app.mark_completed(TopicId::new(1)).unwrap();
    app.reset_progress().unwrap();
    app.end_session().unwrap();

    app.authenticate("john@example.com", "john123").unwrap();
    assert!(app.topics().iter().all(|t| !t.is_completed()));
}

#[tokio::test]
async fn users_do_not_share_progress() {
    let (app, _) = build_app();

    app.authenticate("john@example.com", "john123").unwrap();
    app.refresh_topics().await.unwrap();
    app.mark_completed(TopicId::new(1)).unwrap();
    app.mark_completed(TopicId::new(3)).unwrap();
    app.end_session().unwrap();

    app.authenticate("jane@example.com", "jane123").unwrap();
    assert!(app.topics().is_empty());
    app.refresh_topics().await.unwrap();
    assert!(app.topics().iter().all(|t| !t.is_completed()));
    app.mark_completed(TopicId::new(5)).unwrap();
    app.end_session().unwrap();

    app.authenticate("john@example.com", "john123").unwrap();
    let completed: Vec<u64> = app
        .topics()
        .iter()
        .filter(|t| t.is_completed())
        .map(|t| t.id().value())
        .collect();
    assert_eq!(completed, vec![1, 3]);
}

#[tokio::test]
async fn unknown_credentials_leave_everything_untouched() {
    let (app, progress) = build_app();

    let err = app.authenticate("nobody@example.com", "guess").unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(app.current_session().is_none());
    assert!(progress
        .restore(&UserKey::new("nobody@example.com"))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn login_and_completion_queue_notifications() {
    let (app, _) = build_app();

    app.authenticate("jane@example.com", "jane123").unwrap();
    app.refresh_topics().await.unwrap();
    app.mark_completed(TopicId::new(1)).unwrap();
    // a second mark of the same topic must not queue another notification
    app.mark_completed(TopicId::new(1)).unwrap();

    let notifications = app.drain_notifications();
    assert_eq!(notifications.len(), 2);
    assert!(
        matches!(&notifications[0], Notification::Welcome { name, .. } if name == "Jane")
    );
    assert!(matches!(
        &notifications[1],
        Notification::TopicCompleted { title, .. } if title == "T1"
    ));
    assert!(app.drain_notifications().is_empty());
}
