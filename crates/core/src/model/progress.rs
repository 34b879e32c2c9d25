use crate::model::Topic;

/// Aggregated view of completion progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl ProgressSummary {
    /// Summarize the completion state of a topic list.
    #[must_use]
    pub fn of(topics: &[Topic]) -> Self {
        let total = topics.len();
        let completed = topics.iter().filter(|t| t.is_completed()).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }

    /// Completion percentage, rounded to the nearest whole number.
    ///
    /// An empty list reads as 0%.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.completed as f64 / self.total as f64 * 100.0).round() as u8;
        percent
    }
}
