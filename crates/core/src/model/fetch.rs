/// Observable state of the remote topic retrieval.
///
/// Drives whether the UI may show stale data, a spinner, or an error with a
/// retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No fetch has been issued yet, or the last result was discarded.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch resolved and its result was applied.
    Succeeded,
    /// The last fetch failed; the active list was left untouched.
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchStatus::Failed(_))
    }

    /// The failure message, if the last fetch failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_idle() {
        assert_eq!(FetchStatus::default(), FetchStatus::Idle);
    }

    #[test]
    fn only_failed_carries_a_message() {
        assert_eq!(FetchStatus::Loading.error_message(), None);
        assert_eq!(
            FetchStatus::Failed("timeout".into()).error_message(),
            Some("timeout")
        );
    }
}
