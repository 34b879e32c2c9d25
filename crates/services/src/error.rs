//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by `TopicSource` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopicSourceError {
    #[error("topic source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("a session is already active; end it before authenticating again")]
    SessionActive,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TopicService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopicServiceError {
    #[error(transparent)]
    Source(#[from] TopicSourceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
