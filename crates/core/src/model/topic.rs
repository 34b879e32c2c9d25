use crate::model::ids::TopicId;

/// A unit of learning content with a local completion flag.
///
/// Title and content always come from the most recent fetch; the completed
/// flag is a purely local annotation. The flag moves one way (false to true)
/// and is only reverted by a reset of the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    content: String,
    completed: bool,
}

impl Topic {
    /// Build a topic from its position in a fetched listing.
    ///
    /// Ids are re-sequenced 1..N from position; the source's own ids carry
    /// no durable identity and are ignored.
    #[must_use]
    pub fn from_listing(
        position: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: TopicId::from_position(position),
            title: title.into(),
            content: content.into(),
            completed: false,
        }
    }

    /// Rehydrate a topic from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: TopicId,
        title: impl Into<String>,
        content: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            completed,
        }
    }

    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the topic completed. One-way; completing twice is a no-op.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Clear the completion flag. Only reset-all uses this.
    pub fn clear_completed(&mut self) {
        self.completed = false;
    }
}
