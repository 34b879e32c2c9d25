use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use topics_core::model::TopicId;

/// Transient UI-facing messages produced by state transitions.
///
/// These land in an explicit queue that the UI drains; the core has no
/// process-wide broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Welcome {
        name: String,
        at: DateTime<Utc>,
    },
    TopicCompleted {
        id: TopicId,
        title: String,
    },
}

/// Shared handle to the notification queue.
#[derive(Clone, Default)]
pub struct Notifications {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl Notifications {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a notification. Notifications are fire-and-forget: a poisoned
    /// queue drops the message rather than failing the operation that
    /// produced it.
    pub fn push(&self, notification: Notification) {
        if let Ok(mut guard) = self.queue.lock() {
            guard.push_back(notification);
        }
    }

    /// Take all queued notifications, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        match self.queue.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}
