#![forbid(unsafe_code)]

pub mod app;
pub mod credentials;
pub mod error;
pub mod notifications;
pub mod session;
pub mod topic_source;
pub mod topics;

pub use topics_core::Clock;

pub use app::AppServices;
pub use credentials::{CredentialDirectory, CredentialRecord};
pub use error::{AuthError, TopicServiceError, TopicSourceError};
pub use notifications::{Notification, Notifications};
pub use session::SessionService;
pub use topic_source::{HttpTopicSource, RawTopic, TopicSource, TopicSourceConfig};
pub use topics::{FetchTicket, TopicService};
