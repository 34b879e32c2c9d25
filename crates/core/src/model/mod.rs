mod fetch;
mod ids;
mod progress;
mod topic;
mod user;

pub use fetch::FetchStatus;
pub use ids::{ParseIdError, TopicId};
pub use progress::ProgressSummary;
pub use topic::Topic;
pub use user::{Session, UserKey};
